// Command-line front end: register targets per view, solve once, print the
// illusion's direct face and what each constrained view shows.

use std::num::NonZeroU32;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use illusion_core::render::{render_direct, render_view};
use illusion_core::{
    presets, CheckResult, ConstraintRegistry, IllusionError, IllusionModel, MinisatOptimizer,
    Pattern, SolveConfig, ViewDirection,
};

/// Where a target pattern comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetSource {
    Preset(String),
    File(PathBuf),
}

impl TargetSource {
    fn parse(s: &str) -> Self {
        match s.strip_prefix('@') {
            Some(path) => TargetSource::File(PathBuf::from(path)),
            None => TargetSource::Preset(s.to_string()),
        }
    }

    fn load(&self) -> Result<Pattern, IllusionError> {
        match self {
            TargetSource::Preset(name) => presets::preset(name),
            TargetSource::File(path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(Pattern::parse(&text)?)
            }
        }
    }
}

// VIEW=TARGET[:WEIGHT], e.g. "down=star" or "up=@dot.txt:3"
#[derive(Debug, Clone, PartialEq, Eq)]
struct ConstraintArg {
    view: ViewDirection,
    target: TargetSource,
    weight: NonZeroU32,
}

impl FromStr for ConstraintArg {
    type Err = IllusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || IllusionError::InvalidConstraintArg(s.to_string());

        let (view, rest) = s.split_once('=').ok_or_else(invalid)?;
        let view: ViewDirection = view.parse()?;

        // A trailing ":<digits>" is a weight; anything else belongs to the target
        let (target, weight) = match rest.rsplit_once(':') {
            Some((target, digits)) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                let weight = digits
                    .parse::<u32>()
                    .ok()
                    .and_then(NonZeroU32::new)
                    .ok_or_else(invalid)?;
                (target, weight)
            }
            _ => (rest, NonZeroU32::MIN),
        };

        let target = target.trim();
        if target.is_empty() {
            return Err(invalid());
        }

        Ok(ConstraintArg {
            view,
            target: TargetSource::parse(target),
            weight,
        })
    }
}

/// Height-field illusion solver
#[derive(Parser, Debug)]
#[command(name = "illusion-core")]
#[command(about = "Find one raised/colored grid that shows a different pattern from each viewing direction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Wall-clock budget for the optimizer, in seconds
    #[arg(long, global = true, env = "ILLUSION_TIMEOUT")]
    timeout: Option<u64>,

    /// Print encoding statistics (also enabled by setting ILLUSION_STATS)
    #[arg(long, global = true)]
    stats: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve for an illusion matching one target per view
    Solve {
        /// Target for a view: VIEW=TARGET[:WEIGHT], where TARGET is a preset
        /// name or @path to a pattern file (repeatable)
        #[arg(short = 'c', long = "constrain", required = true)]
        constraints: Vec<ConstraintArg>,
    },

    /// Print a target pattern
    Show {
        /// Preset name or @path to a pattern file
        target: String,
    },

    /// List the built-in target patterns
    Presets,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = SolveConfig {
        time_budget: cli.timeout.map(Duration::from_secs),
    };
    let show_stats = cli.stats || std::env::var("ILLUSION_STATS").is_ok();

    let outcome = match cli.command {
        Some(Command::Solve { constraints }) => solve_cmd(&constraints, config, show_stats),
        Some(Command::Show { target }) => show_cmd(&target),
        Some(Command::Presets) => {
            presets_cmd();
            Ok(())
        }
        None => {
            println!("=== Illusion Solver ===\n");
            println!("No command given: solving the default scenario (up=dot, down=star)");
            println!("Run with --help for the available commands.\n");
            let defaults = [
                ConstraintArg {
                    view: ViewDirection::Up,
                    target: TargetSource::Preset("dot".to_string()),
                    weight: NonZeroU32::MIN,
                },
                ConstraintArg {
                    view: ViewDirection::Down,
                    target: TargetSource::Preset("star".to_string()),
                    weight: NonZeroU32::MIN,
                },
            ];
            solve_cmd(&defaults, config, show_stats)
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(err: &IllusionError) -> i32 {
    match err {
        IllusionError::SolverUnknown { .. } | IllusionError::Unsatisfiable => 2,
        _ => 1,
    }
}

// Load every target and register it. The grid size comes from the first
// target; later ones must match it.
fn build_registry(constraints: &[ConstraintArg]) -> Result<ConstraintRegistry, IllusionError> {
    let mut registry: Option<ConstraintRegistry> = None;

    for arg in constraints {
        let target = arg.target.load()?;
        let current =
            registry.get_or_insert_with(|| ConstraintRegistry::new(IllusionModel::for_pattern(&target)));
        current.add_weighted_constraint(arg.view, &target, arg.weight)?;
    }

    match registry {
        Some(registry) => Ok(registry),
        None => Err(IllusionError::InvalidConstraintArg(String::new())),
    }
}

fn solve_cmd(constraints: &[ConstraintArg], config: SolveConfig, show_stats: bool) -> Result<(), IllusionError> {
    let registry = build_registry(constraints)?;
    let model = registry.model();
    let (height, width) = model.dimensions();

    println!("Grid: {}x{}", height, width);
    println!("  Constraints:");
    for constraint in registry.constraints() {
        println!(
            "    - {} ({} foreground cells, weight {})",
            constraint.view,
            constraint.target.count_foreground(),
            constraint.weight
        );
    }

    let mut optimizer = MinisatOptimizer::new(config);
    let result = registry.solve(&mut optimizer);

    if show_stats {
        let stats = optimizer.stats();
        println!("\n=== ENCODING STATISTICS ===");
        println!("  Unknowns:         {}", model.num_unknowns());
        println!("  Soft constraints: {}", registry.soft_constraints().len());
        println!("  Solver rounds:    {}", stats.rounds);
        println!("  Max variables:    {}", stats.max_vars);
        println!("  Max clauses:      {}", stats.max_clauses);
        println!("  Solve time:       {:.3}ms", stats.elapsed.as_secs_f64() * 1000.0);
    }

    println!("\n=== RESULT ===");
    let solution = match result {
        Ok(solution) => solution,
        Err(IllusionError::SolverUnknown { reason }) => {
            println!("{}", CheckResult::Unknown);
            return Err(IllusionError::SolverUnknown { reason });
        }
        Err(IllusionError::Unsatisfiable) => {
            println!("{}", CheckResult::Unsatisfiable);
            return Err(IllusionError::Unsatisfiable);
        }
        Err(e) => return Err(e),
    };

    println!("{}", CheckResult::Satisfiable);
    println!(
        "satisfied weight: {} / {}",
        solution.satisfied_weight(),
        solution.total_weight()
    );

    println!("\n{}", render_direct(model, &solution));
    for &view in registry.views() {
        println!("{}", view);
        println!("{}", render_view(model, &solution, view));
    }
    Ok(())
}

fn show_cmd(target: &str) -> Result<(), IllusionError> {
    let pattern = TargetSource::parse(target).load()?;
    let (height, width) = pattern.dimensions();
    println!("{}x{}, {} foreground cells\n", height, width, pattern.count_foreground());
    print!("{}", pattern);
    Ok(())
}

fn presets_cmd() {
    println!("Built-in targets:");
    for name in presets::NAMES {
        println!("  {}", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraint_with_default_weight() {
        let arg: ConstraintArg = "down=star".parse().unwrap();
        assert_eq!(arg.view, ViewDirection::Down);
        assert_eq!(arg.target, TargetSource::Preset("star".to_string()));
        assert_eq!(arg.weight.get(), 1);
    }

    #[test]
    fn test_parse_constraint_with_weight_and_file() {
        let arg: ConstraintArg = "Up=@targets/dot.txt:3".parse().unwrap();
        assert_eq!(arg.view, ViewDirection::Up);
        assert_eq!(arg.target, TargetSource::File(PathBuf::from("targets/dot.txt")));
        assert_eq!(arg.weight.get(), 3);
    }

    #[test]
    fn test_parse_constraint_keeps_non_numeric_colon_in_target() {
        let arg: ConstraintArg = "left=@a:b".parse().unwrap();
        assert_eq!(arg.target, TargetSource::File(PathBuf::from("a:b")));
        assert_eq!(arg.weight.get(), 1);
    }

    #[test]
    fn test_parse_constraint_rejects_bad_input() {
        assert!(matches!(
            "star".parse::<ConstraintArg>(),
            Err(IllusionError::InvalidConstraintArg(_))
        ));
        assert!(matches!(
            "up=dot:0".parse::<ConstraintArg>(),
            Err(IllusionError::InvalidConstraintArg(_))
        ));
        assert!(matches!(
            "up=".parse::<ConstraintArg>(),
            Err(IllusionError::InvalidConstraintArg(_))
        ));
        assert!(matches!(
            "dwon=dot".parse::<ConstraintArg>(),
            Err(IllusionError::UnknownView {
                suggestion: Some("down"),
                ..
            })
        ));
    }

    #[test]
    fn test_cli_parses_solve_command() {
        let cli = Cli::try_parse_from([
            "illusion-core",
            "solve",
            "-c",
            "up=dot",
            "--constrain",
            "down=star:2",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(cli.timeout, Some(5));
        match cli.command {
            Some(Command::Solve { constraints }) => {
                assert_eq!(constraints.len(), 2);
                assert_eq!(constraints[1].view, ViewDirection::Down);
                assert_eq!(constraints[1].weight.get(), 2);
            }
            other => panic!("expected Solve, got {:?}", other),
        }
    }

    #[test]
    fn test_build_registry_uses_first_target_size() {
        let constraints: Vec<ConstraintArg> = ["up=dot", "down=star", "direct=circle:2"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let registry = build_registry(&constraints).unwrap();

        assert_eq!(registry.model().dimensions(), (6, 20));
        assert_eq!(
            registry.views(),
            &[ViewDirection::Up, ViewDirection::Down, ViewDirection::Direct]
        );
        assert_eq!(registry.soft_constraints().len(), 3 * 120);
    }

    #[test]
    fn test_build_registry_reports_unknown_preset() {
        let constraints = vec!["up=stra".parse::<ConstraintArg>().unwrap()];
        assert!(matches!(
            build_registry(&constraints),
            Err(IllusionError::UnknownPreset {
                suggestion: Some("star"),
                ..
            })
        ));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&IllusionError::Unsatisfiable), 2);
        assert_eq!(
            exit_code(&IllusionError::SolverUnknown {
                reason: String::new()
            }),
            2
        );
        assert_eq!(
            exit_code(&IllusionError::DimensionMismatch {
                expected: (1, 1),
                found: (2, 2)
            }),
            1
        );
        assert_eq!(
            exit_code(&IllusionError::Backend(anyhow::anyhow!("solver ran out of memory"))),
            1
        );
    }
}
