//! ASUS Slash lighting CLI tool
//!
//! Drives the ROG Slash lightbar through the vendor-defined HID output reports
//! also used by Armoury Crate.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use bytes::Bytes;
use clap::builder::EnumValueParser;
use clap::{
    crate_description, crate_name, crate_version, value_parser, Arg, ArgAction, ArgMatches,
    Command, ValueEnum,
};
use hidapi::{HidApi, HidDevice};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::asus_slash::{AsusSlash, AsusSlashRegular};
use crate::controller::HidController;
use crate::error::{Error, Result};
use crate::mode::Mode;
use crate::protocol::PacketBuilder;

mod asus_slash;
mod battery;
mod controller;
mod error;
mod mode;
mod protocol;

/// Delay for the controller to settle after the wakeup handshake.
const SETTLE_TIME: Duration = Duration::from_millis(50);

/// Bytes of each report shown in logs.
const LOGGED_BYTES: usize = 16;

/// Supported Slash controllers.
#[derive(ValueEnum, Default, PartialEq, Eq, Debug, Copy, Clone)]
enum RgbDevice {
    #[default]
    Slash,
    SlashRegular,
}

impl RgbDevice {
    /// Get the controller for a device.
    fn controller(&self) -> Box<dyn HidController> {
        match self {
            Self::Slash => Box::new(AsusSlash),
            Self::SlashRegular => Box::new(AsusSlashRegular),
        }
    }
}

/// Requested lightbar changes.
#[derive(Debug)]
struct Config {
    device: RgbDevice,
    enabled: Option<bool>,
    mode: Option<String>,
    brightness: u32,
    custom: Option<String>,
    battery: bool,
    battery_path: PathBuf,
    save: bool,
    dry_run: bool,
}

impl Config {
    fn from_cli(matches: &ArgMatches) -> Self {
        let mut config = Config::default();

        if let Some(device) = matches.get_one::<RgbDevice>("device") {
            config.device = *device;
        }
        if let Some(brightness) = matches.get_one::<u32>("brightness") {
            config.brightness = *brightness;
        }
        if let Some(path) = matches.get_one::<PathBuf>("battery-path") {
            config.battery_path = path.clone();
        }

        config.enabled = matches.get_one::<bool>("enable").copied();
        config.mode = matches.get_one::<String>("mode").cloned();
        config.custom = matches.get_one::<String>("custom").cloned();
        config.battery = matches.get_flag("battery");
        config.save = matches.get_flag("save");
        config.dry_run = matches.get_flag("dry-run");

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            battery_path: PathBuf::from(battery::DEFAULT_CAPACITY_PATH),
            brightness: 3,
            device: Default::default(),
            enabled: Default::default(),
            mode: Default::default(),
            custom: Default::default(),
            battery: Default::default(),
            save: Default::default(),
            dry_run: Default::default(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli().get_matches();
    match cli.subcommand_matches("modes") {
        Some(_) => list_modes(),
        None => slashctl(&cli),
    }
}

/// Print all available lighting modes.
fn list_modes() {
    println!("Available modes:\n");
    for mode in Mode::ALL {
        println!("  {:<14} 0x{:02x}", mode.name(), mode.code());
    }
}

/// Update the Slash lightbar.
fn slashctl(matches: &ArgMatches) {
    let config = Config::from_cli(matches);

    if config.dry_run {
        print_config(&config);
        return;
    }

    match write_config(&config) {
        Ok(()) => println!("\x1b[32mSuccessfully applied changes.\x1b[0m"),
        Err(err) => eprintln!("\x1b[31mError:\x1b[0m {err}"),
    }
}

/// Print every report of a config without touching the device.
fn print_config(config: &Config) {
    let builder = config.device.controller().packets();

    let wakeup = builder.wakeup_sequence();
    for packet in wakeup.iter().chain(&config_bytes(&builder, config)) {
        println!("{}", hex_dump(packet, packet.len()));
    }
}

/// Write a config to the HID bus.
fn write_config(config: &Config) -> Result<()> {
    let controller = config.device.controller();

    let api = HidApi::new().map_err(Error::DeviceUnavailable)?;
    let device = api
        .open(controller.vendor_id(), controller.product_id())
        .map_err(Error::DeviceUnavailable)?;
    device.set_blocking_mode(false).map_err(Error::DeviceUnavailable)?;

    info!(
        "Opened device {:04x}:{:04x}",
        controller.vendor_id(),
        controller.product_id()
    );

    let builder = controller.packets();

    write_packets(&device, &builder.wakeup_sequence())?;
    thread::sleep(SETTLE_TIME);
    write_packets(&device, &config_bytes(&builder, config))
}

fn write_packets(device: &HidDevice, packets: &[Bytes]) -> Result<()> {
    for packet in packets {
        debug!("Writing report {}", hex_dump(packet, LOGGED_BYTES));
        device.write(packet).map_err(Error::Write)?;
    }

    Ok(())
}

/// Get all reports following the wakeup handshake.
///
/// Invalid modes or patterns are skipped without affecting other changes.
fn config_bytes(builder: &PacketBuilder, config: &Config) -> Vec<Bytes> {
    let mut packets = Vec::new();

    packets.extend(builder.init_sequence());

    if let Some(enabled) = config.enabled {
        packets.push(builder.set_enabled(enabled));
    }

    if let Some(mode) = &config.mode {
        match builder.set_mode_by_name(mode) {
            Ok(mode_packets) => packets.extend(mode_packets),
            Err(err) => warn!("Skipping mode: {err}"),
        }
    }

    if let Some(custom) = &config.custom {
        let custom_packets =
            protocol::parse_hex(custom).and_then(|pattern| builder.set_custom(&pattern));
        match custom_packets {
            Ok(custom_packets) => packets.extend(custom_packets),
            Err(err) => warn!("Skipping custom pattern: {err}"),
        }
    }

    if config.battery {
        let percent = battery::percent_or_default(&config.battery_path);
        let pattern = battery::encode(config.brightness, percent);
        info!("Battery at {percent}%, pattern {}", hex_dump(&pattern, pattern.len()));

        match builder.set_custom(&pattern) {
            Ok(battery_packets) => packets.extend(battery_packets),
            Err(err) => warn!("Skipping battery pattern: {err}"),
        }
    }

    if config.save {
        packets.push(builder.save());
    }

    packets
}

/// Format up to `limit` bytes as a hex string.
fn hex_dump(bytes: &[u8], limit: usize) -> String {
    bytes.iter().take(limit).map(|byte| format!("{byte:02x}")).collect()
}

/// Get clap CLI parameters.
fn cli() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .subcommand(Command::new("modes").about("List available lighting modes"))
        .arg(
            Arg::new("device")
                .help("Slash device")
                .long("device")
                .short('d')
                .ignore_case(true)
                .value_parser(EnumValueParser::<RgbDevice>::new()),
        )
        .arg(
            Arg::new("enable")
                .help("Turn the lightbar on or off")
                .long("enable")
                .value_parser(value_parser!(bool)),
        )
        .arg(Arg::new("mode").help("Lighting mode (see `modes`)").long("mode").short('m'))
        .arg(
            Arg::new("brightness")
                .help("Battery pattern brightness [possible values: 0..=3]")
                .long("brightness")
                .short('b')
                .default_value("3")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("custom")
                .help("Custom segment pattern [14 hex digits]")
                .long("custom")
                .short('c'),
        )
        .arg(
            Arg::new("battery")
                .help("Show battery charge on the lightbar")
                .long("battery")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("battery-path")
                .help("Battery capacity file")
                .long("battery-path")
                .default_value(battery::DEFAULT_CAPACITY_PATH)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("save")
                .help("Persist the configuration across reboots")
                .long("save")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .help("Print reports instead of writing them")
                .long("dry-run")
                .action(ArgAction::SetTrue),
        )
}
