//! CPG Plot - stacked voltage trace viewer
//!
//! Usage: `cpg_plot <path>`

use cpg_plot::charts::{Figure, FigureBuilder};
use cpg_plot::cli::{InputFile, USAGE};
use cpg_plot::data::DataLoader;
use cpg_plot::gui;
use std::io::{self, Write};
use tracing_subscriber::FmtSubscriber;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the table dump
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let prepared = {
        let mut stdout = io::stdout().lock();
        prepare_figure(std::env::args(), &mut stdout)?
    };

    if let Some((input, figure)) = prepared {
        gui::show_figure(figure, &input.file_name)?;
    }
    Ok(())
}

/// Resolve the path, load the table and build the figure.
///
/// Returns `None` after printing the usage message when no path was given.
fn prepare_figure<I, W>(args: I, out: &mut W) -> anyhow::Result<Option<(InputFile, Figure)>>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let Some(input) = InputFile::from_args(args) else {
        writeln!(out, "{USAGE}")?;
        return Ok(None);
    };

    writeln!(out, "Plotting file from  {}", input.file_name)?;
    let table = DataLoader::load_table(&input.path)?;
    writeln!(out, "{table}")?;

    let figure = FigureBuilder::default().build(&table)?;
    Ok(Some((input, figure)))
}
