//! Main entry point for the migrafmt cli tool

mod cli;
mod plan_file;

use crate::cli::{CliError, Command, ListArgs, RenderArgs};
use clap::Parser;
use cli::Cli;
use comfy_table::{Cell, Table};
use console::Style;
use migrafmt::{
    list_migrations, Direction, FixedClock, FormatterKind, LocalDir, MemDir, PlanWriter,
    WriterConfig, TIMESTAMP_FORMAT,
};
use std::sync::Arc;
use time::PrimitiveDateTime;

fn main() {
    human_panic::setup_panic!(human_panic::Metadata::new(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));

    if let Err(e) = crate::inner_main() {
        eprintln!("{e}");
        std::process::exit(1)
    }
}

fn inner_main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    match &cli.command {
        Some(Command::Render(args)) => render(&cli, config, args),
        Some(Command::Formats) => {
            show_formats();
            Ok(())
        }
        Some(Command::List(args)) => list(&cli, config, args),
        None => Err(CliError::UnknownCommand),
    }
}

fn load_config(cli: &Cli) -> Result<WriterConfig, CliError> {
    match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
                path: path.clone(),
                source,
            })?;
            Ok(WriterConfig::from_toml_str(&text)?)
        }
        None => Ok(WriterConfig::default()),
    }
}

fn parse_timestamp(value: &str) -> Result<time::OffsetDateTime, CliError> {
    Ok(PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)?.assume_utc())
}

fn render(cli: &Cli, mut config: WriterConfig, args: &RenderArgs) -> Result<(), CliError> {
    if let Some(format) = args.format {
        config.format = format;
    }
    config.allow_overwrite |= args.allow_overwrite;

    let plan = plan_file::load_plan(&args.plan)?;
    let formatter = match &args.timestamp {
        Some(ts) => config
            .format
            .formatter_with_clock(Arc::new(FixedClock(parse_timestamp(ts)?))),
        None => config.format.formatter(),
    };

    let green_bold = Style::new().green().bold();
    if args.dry_run {
        let writer = PlanWriter::new(MemDir::new(), formatter);
        for file in writer.render(&plan)? {
            println!("{:>12} {}", green_bold.apply_to("Rendered"), file.name());
            print!("{}", file.content());
        }
        return Ok(());
    }

    let dir = LocalDir::open(&cli.migrations)?;
    let writer = PlanWriter::new(dir, formatter).allow_overwrite(config.allow_overwrite);
    let written = writer.write_plan(&plan)?;
    for name in &written {
        println!("{:>12} {}", green_bold.apply_to("Written"), name);
    }
    println!(
        "{:>12} {} as {} ({} file(s))",
        green_bold.apply_to("Finished"),
        plan,
        config.format,
        written.len()
    );
    Ok(())
}

fn show_formats() {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL_CONDENSED)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_header(vec!["Format", "Up file", "Down file"]);
    for kind in FormatterKind::ALL {
        table.add_row(vec![
            Cell::new(kind.to_string()).fg(comfy_table::Color::Cyan),
            Cell::new(kind.up_file_template()),
            match kind.down_file_template() {
                Some(template) => Cell::new(template),
                None => Cell::new("(same file)").fg(comfy_table::Color::Grey),
            },
        ]);
    }
    println!("Supported formats:\n{table}");
}

fn list(cli: &Cli, config: WriterConfig, args: &ListArgs) -> Result<(), CliError> {
    let kind = args.format.unwrap_or(config.format);
    let dir = LocalDir::open(&cli.migrations)?;
    let files = list_migrations(&dir, kind)?;
    if files.is_empty() {
        println!("No {} migrations in {}.", kind, cli.migrations.display());
        return Ok(());
    }
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL_CONDENSED)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_header(vec!["Version", "Name", "Direction", "File"]);
    for file in files {
        table.add_row(vec![
            Cell::new(&file.version),
            Cell::new(&file.name),
            match file.direction {
                Some(Direction::Up) => Cell::new("up").fg(comfy_table::Color::Green),
                Some(Direction::Down) => Cell::new("down").fg(comfy_table::Color::Red),
                None => Cell::new("up/down").fg(comfy_table::Color::Yellow),
            },
            Cell::new(&file.file_name),
        ]);
    }
    println!("{} migrations:\n{table}", kind);
    Ok(())
}
