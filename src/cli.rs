//! Minimal CLI: check | normalize | kinds
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use json_schema_model::{DEFAULT_MAX_DEPTH, DecodeOptions, Decoder, SchemaKind, SchemaNode};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// decode JSON Schema documents into typed nodes, then check or re-emit them
#[derive(Parser, Debug)]
#[command(name = "json-schema-model", version, about)]
pub struct CommandLineInterface {
    /// more log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// decode every input and report which ones fail
    Check(CheckOut),
    /// decode one schema and print its canonical encoding
    Normalize(NormalizeOut),
    /// print the kind tree of one schema
    Kinds(KindsOut),
}

#[derive(Args, Debug, Clone)]
struct DecodeSettings {
    /// deepest schema nesting accepted before decoding fails
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[derive(clap::Parser, Debug)]
struct CheckOut {
    #[command(flatten)]
    decode_settings: DecodeSettings,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct NormalizeOut {
    #[command(flatten)]
    decode_settings: DecodeSettings,

    /// input schema file
    #[arg(long, short)]
    input: PathBuf,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// single-line output instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[derive(clap::Parser, Debug)]
struct KindsOut {
    #[command(flatten)]
    decode_settings: DecodeSettings,

    /// input schema file
    #[arg(long, short)]
    input: PathBuf,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl DecodeSettings {
    fn decoder(&self) -> Decoder {
        Decoder::new(DecodeOptions { max_depth: self.max_depth })
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_tracing(&self) {
        let fallback = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Check(target) => {
                let decoder = target.decode_settings.decoder();
                let source_paths = resolve_file_path_patterns(&target.input)?;
                tracing::info!(files = source_paths.len(), "checking schemas");

                let results: Vec<(PathBuf, Result<SchemaKind>)> = source_paths
                    .into_par_iter()
                    .map(|path| {
                        let result = load_schema(&decoder, &path).map(|node| node.kind());
                        (path, result)
                    })
                    .collect();

                let mut failures = 0usize;
                for (path, result) in &results {
                    match result {
                        Ok(kind) => println!("{} {} ({kind})", "ok".green(), path.display()),
                        Err(error) => {
                            failures += 1;
                            println!("{} {}: {error:#}", "FAIL".red().bold(), path.display());
                        }
                    }
                }
                tracing::info!(total = results.len(), failures, "check finished");
                Ok(if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
            }
            Command::Normalize(target) => {
                let node = load_schema(&target.decode_settings.decoder(), &target.input)?;
                let schema_src = if target.compact {
                    node.to_json_string()
                } else {
                    node.to_json_string_pretty()
                };
                if let Some(out) = target.out.as_ref() {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("creating {}", parent.display()))?;
                    }
                    std::fs::write(out, &schema_src)
                        .with_context(|| format!("writing {}", out.display()))?;
                } else {
                    println!("{schema_src}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Kinds(target) => {
                let node = load_schema(&target.decode_settings.decoder(), &target.input)?;
                print_kind_tree(&node, "#", 0);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn load_schema(decoder: &Decoder, path: &Path) -> Result<SchemaNode> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let node = decoder
        .decode_slice(&bytes)
        .with_context(|| format!("decoding {}", path.display()))?;
    tracing::debug!(path = %path.display(), kind = %node.kind(), "decoded schema");
    Ok(node)
}

fn print_kind_tree(node: &SchemaNode, label: &str, depth: usize) {
    let indent = "  ".repeat(depth);
    match node.title() {
        Some(title) => println!("{indent}{label}: {} {}", node.kind(), format!("{title:?}").as_str().dimmed()),
        None => println!("{indent}{label}: {}", node.kind()),
    }
    for (child_label, child) in node.children() {
        print_kind_tree(child, &child_label, depth + 1);
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_paths_pass_through() {
        let paths = resolve_file_path_patterns(["a.json", "dir/b.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("a.json"), PathBuf::from("dir/b.json")]);
    }

    #[test]
    fn empty_glob_is_an_error() {
        let err = resolve_file_path_patterns(["/definitely/not/here/*.schema.json"]).unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }

    #[test]
    fn cli_parses_check_with_depth() {
        let cli = CommandLineInterface::try_parse_from([
            "json-schema-model",
            "-vv",
            "check",
            "--max-depth",
            "8",
            "-i",
            "a.json",
            "b.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.cmd {
            Command::Check(check) => {
                assert_eq!(check.decode_settings.max_depth, 8);
                assert_eq!(check.input, ["a.json", "b.json"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
