//! CLI argument parsing using clap.
//!
//! Every option defaults to the layout of a Godot web export, so running
//! `webzip` without arguments from the project root packages the build.

use clap::Parser;
use clap::ValueEnum;
use std::path::PathBuf;
use webzip_core::PackageConfig;
use webzip_core::RepackTool;
use webzip_core::ToolFlavor;
use webzip_core::config::DEFAULT_EXCLUDED_NAMES;
use webzip_core::config::DEFAULT_INTERMEDIATE_NAME;
use webzip_core::config::DEFAULT_OUTPUT;
use webzip_core::config::DEFAULT_ROOT;
use webzip_core::config::DEFAULT_VIRTUAL_ROOT;
use webzip_core::repack::DEFAULT_TOOL_PROGRAM;

#[derive(Parser, Debug)]
#[command(name = "webzip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory to package
    #[arg(long, value_name = "DIR", default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Final archive path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// File name of the store-only archive written next to the output
    #[arg(long, value_name = "NAME", default_value = DEFAULT_INTERMEDIATE_NAME)]
    pub intermediate: String,

    /// Directory name every archive entry is placed under
    #[arg(long, value_name = "NAME", default_value = DEFAULT_VIRTUAL_ROOT)]
    pub prefix: String,

    /// Top-level name to leave out (can be repeated, replaces the defaults)
    #[arg(
        short = 'x',
        long = "exclude",
        value_name = "NAME",
        default_values = DEFAULT_EXCLUDED_NAMES
    )]
    pub exclude: Vec<String>,

    /// Package every top-level entry
    #[arg(long, conflicts_with = "exclude")]
    pub no_exclude: bool,

    /// Archiving program used to repack
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_TOOL_PROGRAM)]
    pub tool: String,

    /// Command-line dialect of the archiving program
    #[arg(long, value_enum, default_value_t = FlavorArg::Winrar)]
    pub tool_flavor: FlavorArg,

    /// Write the store-only archive as the output and skip repacking
    #[arg(long, conflicts_with_all = ["tool", "tool_flavor", "intermediate"])]
    pub no_repack: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

/// Repack tool selection.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlavorArg {
    /// WinRAR command line
    Winrar,
    /// 7-Zip command line
    #[value(name = "7z")]
    SevenZip,
    /// In-process repacking, no external program
    Builtin,
}

impl Cli {
    /// Builds the packaging configuration from the parsed arguments.
    pub fn to_config(&self) -> PackageConfig {
        let excluded = if self.no_exclude {
            Vec::new()
        } else {
            self.exclude.clone()
        };

        let repack = if self.no_repack {
            None
        } else {
            Some(match self.tool_flavor {
                FlavorArg::Winrar => RepackTool::External {
                    program: self.tool.clone(),
                    flavor: ToolFlavor::WinRar,
                },
                FlavorArg::SevenZip => RepackTool::External {
                    program: self.tool.clone(),
                    flavor: ToolFlavor::SevenZip,
                },
                FlavorArg::Builtin => RepackTool::Builtin,
            })
        };

        PackageConfig::default()
            .with_root(&self.root)
            .with_output(&self.output)
            .with_intermediate_name(&self.intermediate)
            .with_virtual_root(&self.prefix)
            .with_excluded_names(excluded)
            .with_repack(repack)
    }
}
