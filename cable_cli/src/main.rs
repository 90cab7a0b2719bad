//! # Cable CLI
//!
//! Terminal front end for `cable_core`. Sizes the circuit described in a
//! JSON plan file, or prompts for a quick demo circuit when no file is
//! given, then prints a report followed by the JSON result.
//!
//! ```text
//! cable_cli shower.json
//! cable_cli shower.json --settings site.json --json
//! RUST_LOG=cable_core=debug cable_cli
//! ```

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cable_core::calculations::{CalculationResult, SizingFailure, SizingSuccess};
use cable_core::errors::{CalcError, CalcResult};
use cable_core::{calculate_with_settings, DesignSettings, InstallationPlan};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "cable_cli", about = "BS 7671 cable sizing for a single circuit", version)]
struct Cli {
    /// JSON installation plan. Omit to enter a demo circuit interactively.
    plan: Option<PathBuf>,

    /// JSON design settings overriding the defaults.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print only the JSON result.
    #[arg(long)]
    json: bool,

    /// Log engine decisions (same as RUST_LOG=debug).
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_string(prompt: &str, default: &str) -> String {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default.to_string();
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default.to_string();
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn load_plan(path: &Path) -> CalcResult<InstallationPlan> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read plan", path.display().to_string(), e.to_string()))?;
    let plan: InstallationPlan = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid plan JSON in {}: {}", path.display(), e)))?;

    tracing::debug!(path = %path.display(), load_type = %plan.load_type, "loaded installation plan");
    Ok(plan)
}

fn demo_plan() -> InstallationPlan {
    println!("Cable CLI - BS 7671 Circuit Design");
    println!("==================================");
    println!();
    println!("No plan file given. Enter a demo circuit...");
    println!();

    let load_type = prompt_string("Load type [Electric shower]: ", "Electric shower");
    let load_w = prompt_f64("Total load (W) [9500]: ", 9500.0);
    let voltage = prompt_f64("Supply voltage (V) [230]: ", 230.0);
    let length_m = prompt_f64("Cable length (m) [18]: ", 18.0);
    let method = prompt_string("Installation method [clipped-direct]: ", "clipped-direct");
    println!();

    InstallationPlan::new(load_type, load_w, voltage, length_m).with_installation_method(method)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match cli.settings.as_deref().map(DesignSettings::load).transpose() {
        Ok(settings) => settings.unwrap_or_default(),
        Err(e) => return report_error(&e),
    };

    let plan = match cli.plan.as_deref() {
        Some(path) => match load_plan(path) {
            Ok(plan) => plan,
            Err(e) => return report_error(&e),
        },
        None => demo_plan(),
    };

    let result = calculate_with_settings(&plan, &settings);

    if !cli.json {
        print_report(&plan, &result, &settings);
        println!();
        println!("JSON Output (for LLM/API use):");
    }
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => return report_error(&CalcError::from(e)),
    }

    if result.is_compliant() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    }
}

fn report_error(e: &CalcError) -> ExitCode {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    ExitCode::FAILURE
}

fn print_report(plan: &InstallationPlan, result: &CalculationResult, settings: &DesignSettings) {
    println!("═══════════════════════════════════════");
    println!("  CABLE CALCULATION RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Load:     {} ({:.0} W)", plan.load_type, plan.total_load_w);
    println!("  Supply:   {:.0} V {}", plan.voltage, plan.phases);
    println!("  Length:   {} m", plan.cable_length_m);
    println!("  Method:   {}", plan.installation_method);
    println!();

    match result {
        CalculationResult::Success(s) => print_success(plan, s, settings),
        CalculationResult::Failure(f) => print_failure(f),
    }
}

fn print_success(plan: &InstallationPlan, s: &SizingSuccess, settings: &DesignSettings) {
    let env = plan.environment();

    println!("Selection:");
    println!("  Cable:    {} ({})", s.cable_type, s.cable_type.designation());
    println!("  Why:      {}", s.cable_type_reason);
    println!("  Method:   {}", s.installation_method);
    println!();
    println!("Design:");
    println!("  Ib = {:.1} A", s.design_current);
    println!("  In = {}", s.protective_device);
    println!("  Size = {} mm² (governs: {})", s.recommended_cable_size, s.selection_reason);
    println!("  It = {:.0} A, Iz = {:.1} A (margin {:.0}%)", s.capacity, s.derated_capacity, s.safety_margin);
    println!();
    println!(
        "{}",
        s.factors
            .summary(env.ambient_temp_c, env.grouping, s.cable_type.insulation())
            .format_report()
    );
    println!();
    println!("Checks:");
    println!(
        "  Coordination: Ib {:.1} ≤ In {} ≤ Iz {:.1} {}",
        s.design_current,
        s.protective_device.rating_a,
        s.derated_capacity,
        status_icon(s.design_current <= s.protective_device.rating() && s.protective_device.rating() <= s.derated_capacity)
    );
    println!(
        "  Voltage drop: {:.2} V ({:.2}% vs {}%) {}",
        s.voltage_drop,
        s.voltage_drop_percent,
        s.voltage_drop_limit_percent,
        status_icon(s.voltage_drop_percent <= s.voltage_drop_limit_percent)
    );
    println!(
        "  Zs:           {:.2} Ω (limit {} Ω, device max {:.2} Ω) {}",
        s.zs,
        settings.zs_limit_ohm,
        s.max_zs_for_device,
        status_icon(s.zs < settings.zs_limit_ohm)
    );

    print_notes(&s.warnings, &s.recommendations);

    println!();
    println!("Materials:");
    for item in &s.materials {
        println!(
            "  {:>6} {:<5} {:<48} {:>8.2}",
            item.quantity, item.unit, item.description, item.total_cost
        );
    }

    for section in &s.practical_guidance {
        println!();
        println!("{}:", section.title);
        for point in &section.points {
            println!("  - {}", point);
        }
    }

    println!();
    println!("Cost estimate ({}):", s.cost_estimate.currency);
    print!("{}", s.cost_estimate.format_report());

    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} ({} mm² {})",
        if s.compliant { "COMPLIANT" } else { "NON-COMPLIANT" },
        s.recommended_cable_size,
        s.cable_type
    );
    println!("═══════════════════════════════════════");
}

fn print_failure(f: &SizingFailure) {
    if let Some(cable_type) = f.cable_type {
        println!("Selection:");
        println!("  Cable:    {}", cable_type);
        if let Some(reason) = &f.cable_type_reason {
            println!("  Why:      {}", reason);
        }
        println!();
    }
    println!("Design:");
    println!("  Ib = {:.1} A", f.design_current);

    print_notes(&f.warnings, &f.recommendations);

    println!();
    println!("═══════════════════════════════════════");
    println!("  RESULT: NO COMPLIANT CABLE");
    println!("═══════════════════════════════════════");
}

fn print_notes(warnings: &[String], recommendations: &[String]) {
    if !warnings.is_empty() {
        println!();
        println!("Warnings:");
        for w in warnings {
            println!("  ! {}", w);
        }
    }
    if !recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for r in recommendations {
            println!("  * {}", r);
        }
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
