use std::path::PathBuf;

use anyhow::{Context, Result};
use banjo_chords::pitch::note_to_pitch_class;
use banjo_chords::shapes::NoteFrequency;
use banjo_chords::{
    calculate_tuning_interval, filter_shapes_by_inversion, find_shape_connectors,
    get_movable_shape_info, shape_frequencies, BanjoError, ChordEngine, ChordTable, Connector,
    Inversion, MovableShape, SearchConfig, Shape, Tuning, TuningFamily, TuningSet,
    ValidationSuite, VoicingMode,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "banjo-chords", version, about = "Banjo tuning and chord shape reference")]
struct Cli {
    /// Tuning to use
    #[arg(short, long, global = true, default_value = "Open G")]
    tuning: String,

    /// YAML file replacing the built-in tuning list
    #[arg(long, global = true)]
    tunings_file: Option<PathBuf>,

    /// YAML file with search limits
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Full,
    Partial,
}

impl From<Mode> for VoicingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Full => VoicingMode::Full,
            Mode::Partial => VoicingMode::Partial,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum InversionArg {
    Root,
    First,
    Second,
    Third,
}

impl From<InversionArg> for Inversion {
    fn from(arg: InversionArg) -> Self {
        match arg {
            InversionArg::Root => Inversion::Root,
            InversionArg::First => Inversion::First,
            InversionArg::Second => Inversion::Second,
            InversionArg::Third => Inversion::Third,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the tunings, grouped by family
    Tunings,

    /// Show every chord shape for a root and chord quality
    Shapes {
        /// Root note (C, F#, Bb, ...)
        root: String,

        /// Chord quality (MAJOR, MINOR, DOM7, MAJ7, MIN7, m7, 7, dim, ...)
        #[arg(default_value = "MAJOR")]
        quality: String,

        /// Full shapes or two-note double stops
        #[arg(short, long, value_enum, default_value = "full")]
        mode: Mode,

        /// Highest fret to search (defaults to the config value)
        #[arg(long)]
        max_fret: Option<u8>,

        /// Only show these inversions
        #[arg(short, long, value_enum)]
        inversion: Vec<InversionArg>,

        /// Include note frequencies (JSON output only)
        #[arg(long)]
        frequencies: bool,
    },

    /// Show the best single chord diagram voicing
    Voicing {
        /// Root note
        root: String,

        /// Chord quality
        #[arg(default_value = "major")]
        quality: String,

        /// Highest fret to search (defaults to the config value)
        #[arg(long)]
        max_fret: Option<u8>,
    },

    /// Show the tuning interval (the "N-fret rule")
    Interval,

    /// Run the built-in validation cases
    Validate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShapesOutput<'a> {
    tuning: &'a str,
    tuning_interval: u8,
    shapes: &'a [Shape],
    connectors: Vec<Connector>,
    movable: Vec<Option<MovableShape>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequencies: Option<Vec<Vec<NoteFrequency>>>,
}

fn load_tunings(path: Option<&PathBuf>) -> Result<TuningSet> {
    match path {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let tunings = TuningSet::from_yaml(&source)
                .with_context(|| format!("Failed to load tunings from {}", path.display()))?;
            log::info!("Loaded {} tunings from {}", tunings.len(), path.display());
            Ok(tunings)
        }
        None => Ok(TuningSet::builtin()?),
    }
}

/// Engine queries treat an unknown root as "no shapes"; on the command line it's a typo.
fn check_root(root: &str) -> Result<()> {
    if note_to_pitch_class(root).is_none() {
        return Err(BanjoError::UnknownNote(root.to_string()).into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn join_frets(shape: &Shape) -> String {
    shape
        .frets()
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

fn print_tunings(tunings: &TuningSet) {
    for family in [
        TuningFamily::CFamily,
        TuningFamily::DFamily,
        TuningFamily::GFamily,
        TuningFamily::OtherFamily,
    ] {
        let members: Vec<&Tuning> = tunings.family(family).collect();
        if members.is_empty() {
            continue;
        }
        println!("{}", family.label());
        for tuning in members {
            println!(
                "  {:<22} {:<16} {:<26} {}",
                tuning.name,
                tuning.strings.join(" "),
                tuning.description,
                tuning.capo_summary()
            );
        }
        println!();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let config = cli
        .config
        .as_deref()
        .map(SearchConfig::load)
        .unwrap_or_default();
    let engine = ChordEngine::new(ChordTable::builtin()?, config);
    let tunings = load_tunings(cli.tunings_file.as_ref())?;

    match cli.command {
        Commands::Tunings => {
            if cli.json {
                print_json(&tunings.iter().collect::<Vec<_>>())?;
            } else {
                print_tunings(&tunings);
            }
        }

        Commands::Shapes {
            root,
            quality,
            mode,
            max_fret,
            inversion,
            frequencies,
        } => {
            check_root(&root)?;
            let tuning = tunings.get(&cli.tuning)?;
            let chord = engine.chords().require(&quality)?;
            let max_fret = max_fret.unwrap_or(engine.config().max_fret);
            let shapes = engine.generate_chord_shapes(&root, &chord.key, tuning, mode.into(), max_fret);
            let filter: Vec<Inversion> = inversion.into_iter().map(Inversion::from).collect();
            let shapes = filter_shapes_by_inversion(shapes, &filter);

            let connectors = find_shape_connectors(&shapes, tuning);
            let movable: Vec<Option<MovableShape>> =
                shapes.iter().map(get_movable_shape_info).collect();

            if cli.json {
                let frequencies: Option<Vec<Vec<NoteFrequency>>> = frequencies
                    .then(|| shapes.iter().map(|s| shape_frequencies(s, tuning)).collect());
                return print_json(&ShapesOutput {
                    tuning: &tuning.name,
                    tuning_interval: calculate_tuning_interval(tuning),
                    shapes: &shapes,
                    connectors,
                    movable,
                    frequencies,
                });
            }

            if shapes.is_empty() {
                println!("No shapes for {} {} in {}.", root, chord.name, tuning.name);
                return Ok(());
            }
            println!("{} {} in {} ({} shapes)", root, chord.name, tuning.name, shapes.len());
            println!();
            for (shape, info) in shapes.iter().zip(&movable) {
                println!(
                    "  {:<14} {:<14} strings {}-{}  frets {:<12} degrees {:<14} {}",
                    shape.position_label,
                    shape.inversion.name(),
                    shape.start_string + 1,
                    shape.end_string + 1,
                    join_frets(shape),
                    shape.degrees().join("-"),
                    info.as_ref().map_or("", |m| m.description.as_str())
                );
            }
            if !connectors.is_empty() {
                println!();
                println!("Connectors ({}-fret rule):", calculate_tuning_interval(tuning));
                for c in &connectors {
                    println!(
                        "  {} -> {}",
                        shapes[c.from].position_label, shapes[c.to].position_label
                    );
                }
            }
        }

        Commands::Voicing {
            root,
            quality,
            max_fret,
        } => {
            check_root(&root)?;
            let tuning = tunings.get(&cli.tuning)?;
            let chord = engine.chords().require(&quality)?;
            let max_fret = max_fret.unwrap_or(engine.config().voicing_max_fret);
            let Some(voicing) = engine.find_chord_voicing(tuning, &root, &chord.key, max_fret) else {
                anyhow::bail!("No playable voicing for {} {} in {}", root, chord.name, tuning.name);
            };

            if cli.json {
                return print_json(&voicing);
            }

            println!("{}{} in {} ({})", root, chord.symbol, tuning.name, voicing.chord_notes.join(" "));
            if voicing.base_fret > 1 {
                println!("Base fret: {}", voicing.base_fret);
            }
            for p in &voicing.positions {
                match p.fret {
                    None => println!("  string {}: x", p.string_num),
                    Some(fret) => println!(
                        "  string {}: fret {:<2} {:<3} {:<3}{}{}",
                        p.string_num,
                        fret,
                        p.note.unwrap_or(""),
                        p.degree.as_deref().unwrap_or(""),
                        p.finger.map(|f| format!(" finger {}", f)).unwrap_or_default(),
                        if p.is_root { " (root)" } else { "" }
                    ),
                }
            }
            if let Some(barre) = voicing.barre {
                println!(
                    "  barre at fret {} across strings {}-{}",
                    barre.fret, barre.from_string, barre.to_string
                );
            }
        }

        Commands::Interval => {
            let tuning = tunings.get(&cli.tuning)?;
            let interval = calculate_tuning_interval(tuning);
            if cli.json {
                return print_json(&serde_json::json!({
                    "tuning": tuning.name,
                    "tuningInterval": interval,
                }));
            }
            println!("{}: shapes repeat {} frets higher", tuning.name, interval);
        }

        Commands::Validate => {
            let report = ValidationSuite::builtin()?.run(&engine, &tunings);
            if cli.json {
                print_json(&report)?;
            } else {
                for r in &report.results {
                    let status = if r.passed { "PASS" } else { "FAIL" };
                    println!("[{}] {} {}", status, r.id, r.description);
                    for e in &r.errors {
                        println!("       {}", e);
                    }
                }
                println!();
                println!("{}/{} passed", report.passed(), report.total());
            }
            if !report.all_passed() {
                anyhow::bail!("{} validation case(s) failed", report.failed());
            }
        }
    }

    Ok(())
}
