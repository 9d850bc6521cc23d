use std::collections::BTreeMap;
use verdant_core::gradient::{PhaseVolumes, ProfilePoint};
use verdant_core::library::schema::ReagentLibrary;
use verdant_core::model::{FactorGroup, ReagentFactor, SubFactor};
use verdant_core::scoring::outcome::{ScoreResult, StageResult};
use verdant_core::trace::TraceBundle;

fn print_stage(stage: &StageResult) {
    println!("  {}: {:.2}", stage.stage, stage.score);

    if stage.contributions.is_empty() {
        println!("    (no reagents)");
    } else {
        let width = stage
            .contributions
            .iter()
            .map(|c| c.reagent.len())
            .max()
            .unwrap_or(10);
        for c in &stage.contributions {
            println!(
                "    {:<width$}  {:>9.2} mL  {:>9.2} g",
                c.reagent,
                c.volume_ml,
                c.mass_g,
                width = width
            );
        }
        println!("    {:<width$}  {:>12}  {:>9.2} g", "total", "", stage.total_mass_g, width = width);
    }

    let rd_marker = if stage.rd_overridden { " (override)" } else { "" };
    println!(
        "    S {:.2}  H {:.2}  E {:.2}  R {:.2}  D {:.2}{}  P {:.2} ({} kWh)",
        stage.main_factors.safety,
        stage.main_factors.health,
        stage.main_factors.environment,
        stage.regeneration,
        stage.disposal,
        rd_marker,
        stage.power,
        stage.energy_kwh
    );
    println!();
}

pub fn print_score(result: &ScoreResult) {
    match &result.name {
        Some(name) => println!("=== {} ===\n", name),
        None => println!("=== Greenness score ===\n"),
    }

    println!("  Score: {:.2}\n", result.score);
    print_stage(&result.instrument);
    print_stage(&result.preparation);

    println!("  Sub-factor profile (merged):");
    for f in SubFactor::ALL {
        println!(
            "    {:<4}{:<26} {:>6.2}",
            f.key(),
            f.label(),
            result.merged_sub_factors.get(&f).copied().unwrap_or(0.0)
        );
    }
    println!();

    let s = &result.schemes;
    println!(
        "  Schemes: safety {}, health {}, environment {}, instrument stage {}, preparation stage {}, final {}",
        s.safety.scheme,
        s.health.scheme,
        s.environment.scheme,
        s.instrument_stage.scheme,
        s.preparation_stage.scheme,
        s.final_.scheme
    );
}

pub fn print_trace(trace: &TraceBundle) {
    println!("\n  Trace:");
    for d in &trace.decisions {
        println!("    [{}] {}", d.decision_id, d.reason);
        for step in &d.steps {
            println!("      {}", step.message);
        }
    }
    if !trace.warnings.is_empty() {
        println!("\n  Warnings:");
        for w in &trace.warnings {
            match w.stage {
                Some(stage) => println!("    {}: {}", stage, w.message),
                None => println!("    {}", w.message),
            }
        }
    }
}

pub fn print_gradient(
    volumes: &PhaseVolumes,
    reagent_volumes: &BTreeMap<String, f64>,
    profile: &[ProfilePoint],
) {
    println!("=== Gradient volumes ===\n");
    println!(
        "  {:>5}  {:>8} {:>8}  {:<16} {:>6}  {:>9} {:>9}",
        "step", "start", "end", "curve", "flow", "A (mL)", "B (mL)"
    );
    for seg in &volumes.segments {
        println!(
            "  {:>5}  {:>8.2} {:>8.2}  {:<16} {:>6.2}  {:>9.3} {:>9.3}",
            seg.step_index,
            seg.start,
            seg.end,
            seg.curve.to_string(),
            seg.flow_rate,
            seg.phase_a_ml,
            seg.phase_b_ml
        );
    }
    println!();
    println!("  Phase A: {:.3} mL", volumes.phase_a_ml);
    println!("  Phase B: {:.3} mL", volumes.phase_b_ml);
    println!("  Total:   {:.3} mL", volumes.total_ml());

    if !reagent_volumes.is_empty() {
        println!("\n  Per reagent:");
        let width = reagent_volumes.keys().map(|k| k.len()).max().unwrap_or(10);
        for (name, ml) in reagent_volumes {
            println!("    {:<width$}  {:>9.3} mL", name, ml, width = width);
        }
    }

    println!("\n  Profile:");
    for p in profile {
        println!(
            "    t={:>7.2} min  A {:>6.2}%  B {:>6.2}%",
            p.time, p.phase_a_percent, p.phase_b_percent
        );
    }
}

pub fn print_reagent(factor: &ReagentFactor) {
    println!("=== {} ===\n", factor.name);
    println!("  Density: {} g/mL\n", factor.density);
    for group in [FactorGroup::Safety, FactorGroup::Health, FactorGroup::Environment] {
        for f in group.members() {
            println!(
                "  {:<4}{:<26} {}",
                f.key(),
                f.label(),
                factor.sub_factors.get(*f)
            );
        }
    }
    println!();
    println!("  Safety score:      {}", factor.safety_score());
    println!("  Health score:      {}", factor.health_score());
    println!("  Environment score: {}", factor.env_score());
    println!("  Regeneration (R):  {}", factor.regeneration);
    println!("  Disposal (D):      {}", factor.disposal);
}

pub fn print_library(library: &ReagentLibrary) {
    println!("{} (v{}), {} reagent(s)\n", library.name(), library.version(), library.len());

    let width = library
        .reagents()
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(10);
    println!(
        "  {:<width$}  {:>7}  {:>6}  {:>6}  {:>6}  {:>5}  {:>5}",
        "reagent",
        "density",
        "S",
        "H",
        "E",
        "R",
        "D",
        width = width
    );
    for r in library.reagents() {
        println!(
            "  {:<width$}  {:>7}  {:>6}  {:>6}  {:>6}  {:>5}  {:>5}",
            r.name,
            r.density.to_string(),
            r.safety_score().to_string(),
            r.health_score().to_string(),
            r.env_score().to_string(),
            r.regeneration.to_string(),
            r.disposal.to_string(),
            width = width
        );
    }
}
