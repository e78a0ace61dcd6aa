use crate::format::{format_brl, format_percent};
use crate::infra::load_tables;
use build_cost::config::AppConfig;
use build_cost::error::AppError;
use build_cost::estimator::{
    estimate, Amenity, AmenitySelection, CostBreakdown, CostTables, FloorCount, HouseType,
    ProjectParameters, StandardTier,
};
use build_cost::payment::{plan, PaymentPlan, PaymentResult, ScheduledPayment};
use build_cost::quote::{CatalogView, ContingencyGuidance};
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PlanMode {
    Cash,
    Installment,
    Financed,
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// Two-letter state code (e.g. SP)
    #[arg(long)]
    pub(crate) region: String,
    /// Build area in square metres
    #[arg(long)]
    pub(crate) area: f64,
    /// Finish standard: low, medium, or high
    #[arg(long, default_value = "medium")]
    pub(crate) standard: StandardTier,
    /// Number of floors (1-3)
    #[arg(long, default_value = "1")]
    pub(crate) floors: FloorCount,
    /// House type: single_storey, two_storey, or triplex
    #[arg(long, default_value = "single_storey")]
    pub(crate) house_type: HouseType,
    /// The build starts on an upper floor
    #[arg(long)]
    pub(crate) upper_floor: bool,
    /// Leave out the garage (included by default)
    #[arg(long)]
    pub(crate) no_garage: bool,
    /// Add a leisure area
    #[arg(long)]
    pub(crate) leisure: bool,
    /// Add a pool
    #[arg(long)]
    pub(crate) pool: bool,
    /// Add a barbecue area
    #[arg(long)]
    pub(crate) barbecue: bool,
    /// Add a security system
    #[arg(long)]
    pub(crate) security: bool,
    /// Contingency percentage (0-30)
    #[arg(long, default_value_t = 10.0)]
    pub(crate) contingency: f64,
    /// Payment plan
    #[arg(long, value_enum, default_value_t = PlanMode::Cash)]
    pub(crate) plan: PlanMode,
    /// Down payment percentage for installment or financed plans (default 30)
    #[arg(long)]
    pub(crate) down_payment: Option<f64>,
    /// Number of installments (default 12)
    #[arg(long)]
    pub(crate) installments: Option<u32>,
    /// Monthly interest rate percentage for financed plans (default 1.5)
    #[arg(long)]
    pub(crate) monthly_rate: Option<f64>,
    /// Print the dated payment schedule
    #[arg(long)]
    pub(crate) schedule: bool,
    /// First payment date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) first_due: Option<NaiveDate>,
    /// CSV of region unit costs overriding the built-in table
    #[arg(long)]
    pub(crate) unit_cost_csv: Option<PathBuf>,
}

impl EstimateArgs {
    fn project_parameters(&self) -> ProjectParameters {
        let amenities = AmenitySelection::none()
            .with(Amenity::Garage, !self.no_garage)
            .with(Amenity::LeisureArea, self.leisure)
            .with(Amenity::Pool, self.pool)
            .with(Amenity::BarbecueArea, self.barbecue)
            .with(Amenity::SecuritySystem, self.security);

        let mut params = ProjectParameters::new(self.region.as_str(), self.area);
        params.standard_tier = self.standard;
        params.floor_count = self.floors;
        params.house_type = self.house_type;
        params.starts_on_upper_floor = self.upper_floor;
        params.contingency_percent = self.contingency;
        params.amenities = amenities;
        params
    }

    fn payment_plan(&self) -> PaymentPlan {
        match self.plan {
            PlanMode::Cash => PaymentPlan::Cash,
            PlanMode::Installment => PaymentPlan::Installment {
                down_payment_percent: self.down_payment,
                installment_count: self.installments,
            },
            PlanMode::Financed => PaymentPlan::Financed {
                down_payment_percent: self.down_payment,
                installment_count: self.installments,
                monthly_rate_percent: self.monthly_rate,
            },
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// CSV of region unit costs overriding the built-in table
    #[arg(long)]
    pub(crate) unit_cost_csv: Option<PathBuf>,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let tables = load_tables(&config.catalog, args.unit_cost_csv.clone())?;

    let params = args.project_parameters();
    let breakdown = estimate(&params, &tables)?;
    let payment = plan(breakdown.total, &args.payment_plan())?;
    let schedule = if args.schedule {
        let first_due = args.first_due.unwrap_or_else(|| Local::now().date_naive());
        Some(payment.schedule(first_due)?)
    } else {
        None
    };

    println!(
        "{}",
        render_estimate(&params, &tables, &breakdown, &payment, schedule.as_deref())
    );
    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let tables = load_tables(&config.catalog, args.unit_cost_csv)?;
    println!("{}", render_catalog(&CatalogView::from_tables(&tables)));
    Ok(())
}

fn render_estimate(
    params: &ProjectParameters,
    tables: &CostTables,
    breakdown: &CostBreakdown,
    payment: &PaymentResult,
    schedule: Option<&[ScheduledPayment]>,
) -> String {
    let mut lines = Vec::new();
    let region_name = tables
        .regions
        .get(&params.region)
        .map(|entry| entry.name.as_str())
        .unwrap_or_else(|| params.region.as_str());

    lines.push("Construction cost estimate".to_string());
    lines.push(format!(
        "{} ({}) | {} m² | unit cost {}/m²",
        region_name,
        params.region,
        params.area,
        format_brl(breakdown.unit_cost)
    ));

    lines.push("\nBreakdown".to_string());
    for line in breakdown.line_items() {
        lines.push(format!("- {}: {}", line.label, format_brl(line.amount)));
    }
    for amenity in &breakdown.amenities {
        lines.push(format!(
            "  - {} (+{}): {}",
            amenity.label,
            format_percent(amenity.rate * 100.0),
            format_brl(amenity.amount)
        ));
    }

    let guidance = ContingencyGuidance::for_percent(breakdown.contingency_percent);
    lines.push(format!(
        "Contingency {} is {}",
        format_percent(breakdown.contingency_percent),
        guidance.label()
    ));

    lines.push("\nAllocation".to_string());
    lines.push(format!(
        "- Materials (50%): {}",
        format_brl(breakdown.allocation.materials)
    ));
    lines.push(format!(
        "- Labor (40%): {}",
        format_brl(breakdown.allocation.labor)
    ));
    lines.push(format!(
        "- Contingency reserve (10%): {}",
        format_brl(breakdown.allocation.contingency_reserve)
    ));

    lines.push(format!("\nPayment: {}", payment.mode().label()));
    match payment {
        PaymentResult::Cash(result) => {
            lines.push(format!("- Discount (5%): {}", format_brl(result.discount)));
            lines.push(format!("- Amount due: {}", format_brl(result.final_value)));
        }
        PaymentResult::Installment(result) => {
            lines.push(format!(
                "- Down payment ({}): {}",
                format_percent(result.down_payment_percent),
                format_brl(result.down_payment)
            ));
            lines.push(format!("- Remaining: {}", format_brl(result.remaining)));
            lines.push(format!(
                "- {}x of {} interest-free",
                result.installment_count,
                format_brl(result.installment_value)
            ));
        }
        PaymentResult::Financed(result) => {
            lines.push(format!(
                "- Down payment ({}): {}",
                format_percent(result.down_payment_percent),
                format_brl(result.down_payment)
            ));
            lines.push(format!("- Financed: {}", format_brl(result.financed_amount)));
            lines.push(format!(
                "- {}x of {} at {} a month ({} a year)",
                result.installment_count,
                format_brl(result.installment_value),
                format_percent(result.monthly_rate_percent),
                format_percent(result.nominal_annual_rate_percent)
            ));
            lines.push(format!("- Total paid: {}", format_brl(result.total_paid)));
            lines.push(format!(
                "- Total interest: {}",
                format_brl(result.total_interest)
            ));
        }
    }

    if let Some(rows) = schedule {
        lines.push("\nSchedule".to_string());
        for row in rows {
            let label = if row.number == 0 {
                "down".to_string()
            } else {
                format!("#{}", row.number)
            };
            lines.push(format!(
                "- {} | {} | {} | interest {} | balance {}",
                label,
                row.due_on,
                format_brl(row.amount),
                format_brl(row.interest),
                format_brl(row.balance)
            ));
        }
    }

    lines.join("\n")
}

fn render_catalog(view: &CatalogView) -> String {
    let mut lines = vec!["Regions (unit cost per m²)".to_string()];
    for region in &view.regions {
        lines.push(format!(
            "- {} {}: {}",
            region.code,
            region.name,
            format_brl(region.unit_cost)
        ));
    }

    lines.push("\nStandards".to_string());
    for option in &view.standard_tiers {
        lines.push(format!(
            "- {} ({}): x{} {}",
            option.id.id(),
            option.label,
            option.factor,
            option.description
        ));
    }

    lines.push("\nFloors".to_string());
    for option in &view.floor_counts {
        lines.push(format!("- {}: x{}", option.label, option.factor));
    }

    lines.push("\nHouse types".to_string());
    for option in &view.house_types {
        lines.push(format!(
            "- {} ({}): x{}",
            option.id.id(),
            option.label,
            option.factor
        ));
    }

    lines.push("\nAmenities".to_string());
    for option in &view.amenities {
        lines.push(format!(
            "- {}: +{}",
            option.label,
            format_percent(option.surcharge_rate * 100.0)
        ));
    }

    let payment = &view.payment;
    lines.push("\nPayment options".to_string());
    lines.push(format!(
        "- Installments: {:?}",
        payment.installment_counts
    ));
    lines.push(format!("- Financing terms (months): {:?}", payment.financing_terms));
    lines.push(format!(
        "- Down payment {}-{} | monthly rate {}-{}",
        format_percent(payment.down_payment_percent.min),
        format_percent(payment.down_payment_percent.max),
        format_percent(payment.monthly_rate_percent.min),
        format_percent(payment.monthly_rate_percent.max)
    ));

    lines.join("\n")
}
