//! Configuration management for fig2gerber
//!
//! This module handles CLI argument parsing and application settings.

use anyhow::Result;
use clap::builder::styling;
use clap::{value_parser, Arg, ArgMatches, ColorChoice, Command};
use std::path::PathBuf;
use tracing::info;

use crate::error::Fig2GerberError;

/// Largest accepted `--range` value.
const MAX_LAYER_RANGE: u32 = 98;

/// Build the CLI command
pub fn build_cli() -> Command {
    let styles = styling::Styles::styled()
        .header(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Blue.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default());

    Command::new("fig2gerber")
        .about("fig2gerber - Generate Gerber, drill and tool report files for PCB fabrication from XFig drawings")
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("source")
                .help("Input XFig drawing, or - for standard input")
                .value_parser(value_parser!(String))
                .default_value("-"),
        )
        .arg(
            Arg::new("drill")
                .short('1')
                .long("drill")
                .help("Create the drill file and the tool usage report")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("component_copper")
                .short('2')
                .long("component-copper")
                .help("Create the component-side copper layer file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("solder_copper")
                .short('3')
                .long("solder-copper")
                .help("Create the solder-side copper layer file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("inner_component")
                .short('4')
                .long("inner-component")
                .help("Create the inner layer file close to the component side")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("inner_solder")
                .short('5')
                .long("inner-solder")
                .help("Create the inner layer file close to the solder side")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("component_mask")
                .short('6')
                .long("component-mask")
                .help("Create the component-side solder mask file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("solder_mask")
                .short('7')
                .long("solder-mask")
                .help("Create the solder-side solder mask file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("top_silk")
                .short('8')
                .short_alias('s')
                .long("top-silk")
                .help("Create the top silk screen file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("bottom_silk")
                .short('9')
                .short_alias('S')
                .long("bottom-silk")
                .help("Create the bottom silk screen file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("range")
                .short('r')
                .long("range")
                .help("Number of layers a --layers-from window collects")
                .value_parser(value_parser!(u32))
                .default_value("20"),
        )
        .arg(
            Arg::new("start")
                .short('n')
                .long("layers-from")
                .help("Create a file from layers <START> to <START>+range-1; the first layer is the knockout layer")
                .value_name("START")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("layer_file")
                .short('l')
                .long("layer-file")
                .help("Create a file from the layers listed in <FILE>; the first layer is the knockout layer")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("transfer")
                .short('t')
                .long("transfer")
                .help("Append the metal-plane transfer layer (15) to layer windows (default)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no_transfer")
                .short('T')
                .long("no-transfer")
                .help("Do not append the transfer layer to layer windows")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("double_side")
                .short('d')
                .long("double-side")
                .help("Standard double-sided file set: drill, tool report and both copper layers")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("double_side_full")
                .short('D')
                .long("double-side-full")
                .help("Like --double-side, plus solder masks and top silk screen")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("join")
                .short('j')
                .long("join-masks")
                .help("Join the top and bottom solder masks into one file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no_join")
                .short('J')
                .long("no-join-masks")
                .help("Keep solder masks separate (default)")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("four_layer")
                .short('f')
                .long("four-layer")
                .help("Simple four-layer file set: drill, tool report, coppers and inner layers")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("four_layer_full")
                .short('F')
                .long("four-layer-full")
                .help("Like --four-layer, plus solder masks and top silk screen")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output name root instead of the source name; - writes to standard output")
                .value_name("NAME")
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("extended")
                .short('X')
                .long("extended")
                .help("Write extended (RS274X) artwork with a knockout image for inner-layer insulation")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no_progress")
                .long("no-progress")
                .help("Disable progress indicators")
                .action(clap::ArgAction::SetTrue),
        )
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Input drawing path; "-" reads standard input
    pub source: PathBuf,

    /// Output name root overriding the source name; "-" writes stdout
    pub output_root: Option<String>,

    /// Write extended (RS274X) artwork with dark and clear images
    pub extended: bool,

    // job selection flags
    pub drill: bool,
    pub component_copper: bool,
    pub solder_copper: bool,
    pub inner_component: bool,
    pub inner_solder: bool,
    pub component_mask: bool,
    pub solder_mask: bool,
    pub top_silk: bool,
    pub bottom_silk: bool,
    pub double_side: bool,
    pub double_side_full: bool,
    pub four_layer: bool,
    pub four_layer_full: bool,

    /// Join top and bottom solder masks into one output
    pub join_masks: bool,

    /// Append the transfer layer to ad-hoc layer windows
    pub transfer_mode: bool,

    /// First layer of an ad-hoc layer window
    pub layer_start: Option<u32>,

    /// Size of an ad-hoc layer window
    pub layer_range: u32,

    /// File naming an explicit layer list
    pub layer_file: Option<PathBuf>,

    /// Enable verbose logging
    pub verbose: bool,

    /// Disable progress bars
    pub no_progress: bool,
}

impl Config {
    /// Parse arguments and apply initial configuration
    pub fn from_args() -> Result<Self> {
        let matches = build_cli().get_matches();
        let config = Self::from_matches(&matches);

        // Set up tracing with environment variable support
        // RUST_LOG takes precedence over the verbose flag
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));

        tracing_subscriber::fmt().with_env_filter(env_filter).init();

        if config.verbose {
            info!("Configuration: {:?}", config);
        }

        Ok(config)
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Config {
            source: PathBuf::from(
                matches
                    .get_one::<String>("source")
                    .cloned()
                    .unwrap_or_else(|| "-".to_string()),
            ),
            output_root: matches.get_one::<String>("output").cloned(),
            extended: matches.get_flag("extended"),
            drill: matches.get_flag("drill"),
            component_copper: matches.get_flag("component_copper"),
            solder_copper: matches.get_flag("solder_copper"),
            inner_component: matches.get_flag("inner_component"),
            inner_solder: matches.get_flag("inner_solder"),
            component_mask: matches.get_flag("component_mask"),
            solder_mask: matches.get_flag("solder_mask"),
            top_silk: matches.get_flag("top_silk"),
            bottom_silk: matches.get_flag("bottom_silk"),
            double_side: matches.get_flag("double_side"),
            double_side_full: matches.get_flag("double_side_full"),
            four_layer: matches.get_flag("four_layer"),
            four_layer_full: matches.get_flag("four_layer_full"),
            join_masks: matches.get_flag("join") && !matches.get_flag("no_join"),
            transfer_mode: !matches.get_flag("no_transfer"),
            layer_start: matches.get_one::<u32>("start").copied(),
            layer_range: matches.get_one::<u32>("range").copied().unwrap_or(20),
            layer_file: matches.get_one::<PathBuf>("layer_file").cloned(),
            verbose: matches.get_flag("verbose"),
            no_progress: matches.get_flag("no_progress"),
        }
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.layer_range < 1 || self.layer_range > MAX_LAYER_RANGE {
            return Err(Fig2GerberError::InvalidLayerRange {
                value: self.layer_range,
                max: MAX_LAYER_RANGE,
            }
            .into());
        }

        if !self.reads_stdin() && !self.source.exists() {
            return Err(anyhow::anyhow!(
                "Input drawing does not exist: {}",
                self.source.display()
            ));
        }

        info!("Configuration validation completed successfully");
        Ok(())
    }

    /// True when the drawing is read from standard input
    pub fn reads_stdin(&self) -> bool {
        self.source.as_os_str() == "-"
    }

    #[cfg(test)]
    pub(crate) fn default_for_tests() -> Self {
        Config {
            source: PathBuf::from("-"),
            output_root: None,
            extended: false,
            drill: false,
            component_copper: false,
            solder_copper: false,
            inner_component: false,
            inner_solder: false,
            component_mask: false,
            solder_mask: false,
            top_silk: false,
            bottom_silk: false,
            double_side: false,
            double_side_full: false,
            four_layer: false,
            four_layer_full: false,
            join_masks: false,
            transfer_mode: true,
            layer_start: None,
            layer_range: 20,
            layer_file: None,
            verbose: false,
            no_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let matches = build_cli()
            .try_get_matches_from(std::iter::once("fig2gerber").chain(args.iter().copied()))
            .expect("arguments should parse");
        Config::from_matches(&matches)
    }

    #[test]
    fn defaults_read_stdin_with_no_jobs() {
        let config = parse(&[]);
        assert!(config.reads_stdin());
        assert!(!config.drill);
        assert!(config.transfer_mode);
        assert_eq!(config.layer_range, 20);
    }

    #[test]
    fn numeric_job_flags_parse() {
        let config = parse(&["-1", "-2", "-7", "board.fig"]);
        assert!(config.drill);
        assert!(config.component_copper);
        assert!(config.solder_mask);
        assert!(!config.solder_copper);
        assert_eq!(config.source, PathBuf::from("board.fig"));
    }

    #[test]
    fn silk_screen_short_aliases() {
        let config = parse(&["-s", "-S"]);
        assert!(config.top_silk);
        assert!(config.bottom_silk);
    }

    #[test]
    fn layer_window_options() {
        let config = parse(&["-n", "100", "-r", "40", "-T", "-X"]);
        assert_eq!(config.layer_start, Some(100));
        assert_eq!(config.layer_range, 40);
        assert!(!config.transfer_mode);
        assert!(config.extended);
    }

    #[test]
    fn no_join_wins_over_join() {
        assert!(parse(&["-j"]).join_masks);
        assert!(!parse(&["-j", "-J"]).join_masks);
    }

    #[test]
    fn range_validation_bounds() {
        let mut config = parse(&["-r", "99"]);
        assert!(config.validate().is_err());
        config.layer_range = 0;
        assert!(config.validate().is_err());
        config.layer_range = 98;
        assert!(config.validate().is_ok());
    }
}
