use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cost_of_delay::comparison::{self, Upsert};
use cost_of_delay::evaluate::{ProjectInputs, SalaryBasis, UNNAMED_PROJECT};
use cost_of_delay::models::{UrgencyProfile, WorkItemResult};
use cost_of_delay::{delay, employee, executive, export, format, report, store, urgency};

#[derive(Parser)]
#[command(name = "cost-of-delay")]
#[command(about = "Cost of Delay and CD3 calculator for prioritizing work items", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Session file holding the last calculation and the comparison set
    #[arg(long, global = true, env = "COD_SESSION", default_value = "cod-session.json")]
    session: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate cost of delay for one work item
    Calculate {
        #[command(flatten)]
        project: ProjectArgs,
        /// Also add the result to the comparison set
        #[arg(long)]
        compare: bool,
        /// Do not write the result to the session file
        #[arg(long)]
        no_save: bool,
    },
    /// Print the weekly loss and cumulative cost series
    Curve {
        #[arg(long, allow_negative_numbers = true)]
        weekly_value: f64,
        #[arg(long, allow_negative_numbers = true)]
        delay_weeks: f64,
        #[arg(long, default_value = "standard")]
        urgency: String,
        /// Emit CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// List compared work items ranked by CD3
    Compare {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Remove a work item from the comparison set
    Remove {
        #[arg(long)]
        name: String,
    },
    /// Remove every work item from the comparison set
    Clear,
    /// Recompute every stored result with the current formulas
    Recalculate,
    /// Export the current result and comparison set
    Export {
        #[arg(long, value_enum)]
        format: ExportFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("salary")
        .args(["annual_salary", "hourly_rate"])
        .multiple(false)
))]
struct ProjectArgs {
    #[arg(long, default_value = UNNAMED_PROJECT)]
    name: String,
    /// Value delivered per week once live
    #[arg(long, allow_negative_numbers = true)]
    weekly_value: f64,
    #[arg(long, allow_negative_numbers = true)]
    development_weeks: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    delay_weeks: f64,
    /// standard, expedite, fixed-date or intangible
    #[arg(long, default_value = "standard")]
    urgency: String,
    #[arg(long, allow_negative_numbers = true)]
    annual_salary: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    hourly_rate: Option<f64>,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    team_size: f64,
    #[arg(long, env = "COD_BENEFITS_MULTIPLIER", default_value_t = employee::DEFAULT_BENEFITS_MULTIPLIER)]
    benefits_multiplier: f64,
    #[arg(long)]
    target_launch_date: Option<NaiveDate>,
    #[arg(long)]
    revised_launch_date: Option<NaiveDate>,
}

impl From<ProjectArgs> for ProjectInputs {
    fn from(args: ProjectArgs) -> Self {
        let salary_type = if args.hourly_rate.is_some() {
            SalaryBasis::Hourly
        } else {
            SalaryBasis::Annual
        };

        ProjectInputs {
            project_name: args.name,
            weekly_value: args.weekly_value,
            development_weeks: args.development_weeks,
            delay_weeks: args.delay_weeks,
            urgency_profile: args.urgency,
            salary_type,
            annual_salary: args.annual_salary.unwrap_or(0.0),
            hourly_rate: args.hourly_rate.unwrap_or(0.0),
            team_size: args.team_size,
            benefits_multiplier: args.benefits_multiplier,
            target_launch_date: args.target_launch_date,
            revised_launch_date: args.revised_launch_date,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
    Report,
    /// Plain-text CEO/CFO/CMO/CTO/COO analysis
    Executive,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let session_path = cli.session.as_path();

    match cli.command {
        Commands::Calculate {
            project,
            compare,
            no_save,
        } => {
            let mut session = store::load_or_default(session_path)?;
            let result = session.calculate(project.into())?.clone();
            print_result(&result);

            if compare {
                match session.compare_current() {
                    Some(Upsert::Added) => {
                        println!("\"{}\" added to comparison.", result.project_name)
                    }
                    Some(Upsert::Replaced) => {
                        println!("\"{}\" replaced in comparison.", result.project_name)
                    }
                    None => {}
                }
            }
            if !no_save {
                store::save(session_path, &session)?;
            }
        }
        Commands::Curve {
            weekly_value,
            delay_weeks,
            urgency: profile_name,
            csv,
        } => {
            let profile: UrgencyProfile = profile_name.parse()?;
            delay::check_scalar("weeklyValue", weekly_value)?;
            delay::check_delay_weeks(delay_weeks)?;
            let breakdown = urgency::compute_losses(profile, weekly_value, delay_weeks);
            let curve = urgency::loss_curve(&breakdown.weekly_losses);

            if csv {
                println!("week,loss,cumulative");
                for point in curve {
                    println!("{},{:.2},{:.2}", point.week, point.loss, point.cumulative);
                }
            } else {
                println!("Week  Weekly Loss  Cumulative");
                for point in curve {
                    println!(
                        "{:>4}  {:>11}  {:>10}",
                        point.week,
                        format::currency(point.loss),
                        format::currency(point.cumulative)
                    );
                }
                println!(
                    "Total {} (peak week {})",
                    format::currency(breakdown.total_cost_of_delay),
                    format::currency(breakdown.peak_weekly_loss)
                );
            }
        }
        Commands::Compare { limit } => {
            let session = store::load_or_default(session_path)?;
            let ranked = session.comparison.ranked();

            if ranked.is_empty() {
                println!("No projects in comparison.");
                return Ok(());
            }

            println!("Projects by CD3:");
            for (rank, project) in ranked.iter().take(limit).enumerate() {
                let team = project
                    .team_size()
                    .map_or_else(|| "N/A".to_string(), |size| size.to_string());
                println!(
                    "{}. {} CD3 {}/wk, cost of delay {}, employee cost {}, total impact {} ({} dev, {} delay, team {})",
                    rank + 1,
                    project.project_name,
                    format::currency(project.cost_of_delay.cd3),
                    format::currency(project.cost_of_delay.total_cost_of_delay),
                    if project.employee.has_employee_costs() {
                        format::currency(project.total_delay_cost())
                    } else {
                        "N/A".to_string()
                    },
                    format::currency(project.total_economic_impact()),
                    format::weeks(project.cost_of_delay.development_weeks),
                    format::weeks(project.cost_of_delay.delay_weeks),
                    team
                );
            }
        }
        Commands::Remove { name } => {
            let mut session = store::load_or_default(session_path)?;
            if session.comparison.remove(&name) {
                store::save(session_path, &session)?;
                println!("Removed \"{name}\" from comparison.");
            } else {
                println!("No project named \"{name}\" in comparison.");
            }
        }
        Commands::Clear => {
            let mut session = store::load_or_default(session_path)?;
            let removed = session.comparison.clear();
            if removed > 0 {
                store::save(session_path, &session)?;
            }
            println!("Cleared {removed} projects from comparison.");
        }
        Commands::Recalculate => {
            let session = store::load(session_path)?;
            store::save(session_path, &session)?;
            println!(
                "Recalculated {} comparison projects{}.",
                session.comparison.len(),
                if session.current.is_some() {
                    " and the current project"
                } else {
                    ""
                }
            );
        }
        Commands::Export {
            format: export_format,
            out,
        } => {
            let session = store::load_or_default(session_path)?;
            let now = Utc::now();
            let selection =
                comparison::export_selection(session.current.as_ref(), &session.comparison);

            let (content, default_name) = match export_format {
                ExportFormat::Json => {
                    let current = current_result(session.current.as_ref())?;
                    (
                        export::to_json(current, &session.comparison, now)?,
                        export::json_file_name(&current.project_name, now),
                    )
                }
                ExportFormat::Csv => {
                    if selection.is_empty() {
                        anyhow::bail!("No results to export; run `calculate` first");
                    }
                    (export::to_csv(&selection)?, export::csv_file_name(now))
                }
                ExportFormat::Report => {
                    let current = current_result(session.current.as_ref())?;
                    (
                        report::build_report(current, &session.comparison, now),
                        export::report_file_name(&current.project_name, now),
                    )
                }
                ExportFormat::Executive => {
                    let current = current_result(session.current.as_ref())?;
                    (
                        executive::build_executive_analysis(current, now),
                        export::executive_file_name(&current.project_name, now),
                    )
                }
            };

            let out = out.unwrap_or_else(|| PathBuf::from(default_name));
            write_export(&out, &content)?;
            println!("Export written to {}.", out.display());
        }
    }

    Ok(())
}

fn current_result(current: Option<&WorkItemResult>) -> anyhow::Result<&WorkItemResult> {
    current.context("No results to export; run `calculate` first")
}

fn write_export(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("failed to write export {}", path.display()))?;
    info!(path = %path.display(), bytes = content.len(), "export written");
    Ok(())
}

fn print_result(result: &WorkItemResult) {
    let cod = &result.cost_of_delay;
    println!(
        "{} ({} dev, {} delay, {})",
        result.project_name,
        format::weeks(cod.development_weeks),
        format::weeks(cod.delay_weeks),
        cod.urgency_profile
    );
    println!("Total cost of delay: {}", format::currency(cod.total_cost_of_delay));
    println!("CD3: {}/wk", format::currency(cod.cd3));
    println!("Peak weekly loss: {}", format::currency(cod.peak_weekly_loss));
    println!(
        "Opportunity cost: {} of annual value",
        format::percent(cod.opportunity_cost, 2)
    );
    println!(
        "Payback: {} planned, {} delayed (+{})",
        format::weeks(cod.normal_payback_weeks),
        format::weeks(cod.delayed_payback_weeks),
        format::weeks(cod.additional_payback_time)
    );

    if let Some(costs) = result.employee.costs() {
        println!(
            "Team burn: {} people, {}/hr each, {}/wk for the team",
            costs.team_size,
            format::currency_detailed(costs.hourly_rate),
            format::currency(costs.team_weekly_cost)
        );
        println!(
            "Employee cost: {} development, {} during delay",
            format::currency(costs.total_development_cost),
            format::currency(costs.total_delay_cost)
        );
    }
    println!(
        "Total economic impact: {}",
        format::currency(result.total_economic_impact())
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_numbers_reach_engine_validation() {
        let cli = Cli::try_parse_from([
            "cost-of-delay",
            "calculate",
            "--weekly-value",
            "1000",
            "--development-weeks",
            "10",
            "--delay-weeks",
            "-2",
        ])
        .unwrap();
        let Commands::Calculate { project, .. } = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(project.delay_weeks, -2.0);

        let err = ProjectInputs::from(project).evaluate().unwrap_err();
        assert_eq!(err.to_string(), "delayWeeks must be non-negative (got -2)");
    }

    #[test]
    fn curve_accepts_negative_weekly_value() {
        let cli = Cli::try_parse_from([
            "cost-of-delay",
            "curve",
            "--weekly-value",
            "-5",
            "--delay-weeks",
            "3",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Curve { weekly_value, .. } if weekly_value == -5.0
        ));
    }

    #[test]
    fn salary_options_are_exclusive() {
        let result = Cli::try_parse_from([
            "cost-of-delay",
            "calculate",
            "--weekly-value",
            "1000",
            "--development-weeks",
            "10",
            "--annual-salary",
            "100000",
            "--hourly-rate",
            "50",
        ]);
        assert!(result.is_err());
    }
}
