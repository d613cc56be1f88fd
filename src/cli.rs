//! Minimal CLI: format/resolve → (json | schema | model)

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::codegen::ModelLanguage;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// parse JSON documents and output resolved/canonical JSON, an inferred schema
/// debug view, or a typed model in one of six target languages
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// pretty-print, optionally resolving $ref/ref pointers and sorting keys
    Format(FormatOut),
    /// dump the inferred type tree and object definitions as JSON
    Schema(SchemaOut),
    /// emit a typed data model for the inferred structure
    Model(ModelOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// output file (stdout if omitted; requires a single input)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FormatOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// resolve $ref/ref pointers against JSON pointers and $id targets
    #[arg(long, default_value_t = false)]
    resolve_refs: bool,

    /// rebuild every object with keys in ascending order
    #[arg(long, default_value_t = false)]
    sort_keys: bool,
}

#[derive(Args, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// top-level type name
    #[arg(long, default_value = "Root")]
    root_type: String,
}

#[derive(Args, Debug)]
struct ModelOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// target language
    #[arg(long, value_enum)]
    lang: ModelLanguage,

    /// top-level type name
    #[arg(long, default_value = "Root")]
    root_type: String,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Read each resolved input, run `process` on it, and write the result to
    /// `--out` or stdout.
    fn load_process(&self, mut process: impl FnMut(&str, &str) -> Result<String>) -> Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        if self.out.is_some() && source_paths.len() != 1 {
            bail!("--out requires exactly one input, got {}", source_paths.len());
        }
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file {source_path_str}"))?;
            let rendered = process(&source, &source_path_str)?;
            match self.out.as_ref() {
                Some(out) => {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(out, rendered)?;
                }
                None => println!("{rendered}"),
            }
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Format(target) => target.input_settings.load_process(|source, path| {
                let value = crate::resolve::parse_and_format_json(source, target.resolve_refs)
                    .with_context(|| format!("while formatting {path}"))?;
                let value = if target.sort_keys {
                    crate::canon::sort_json_keys_deep(&value)
                } else {
                    value
                };
                Ok(serde_json::to_string_pretty(&value)?)
            }),
            Command::Schema(target) => target.input_settings.load_process(|source, path| {
                let value = crate::error::parse_json(source)
                    .with_context(|| format!("while parsing {path}"))?;
                let schema = crate::schema::build_schema(&value, &target.root_type);
                Ok(serde_json::to_string_pretty(&schema)?)
            }),
            Command::Model(target) => target.input_settings.load_process(|source, path| {
                crate::codegen::generate_model_from_json(source, target.lang, &target.root_type)
                    .with_context(|| format!("while generating a model for {path}"))
            }),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

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
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Explicit glob matching nothing is an error, not a no-op.
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
    use clap::CommandFactory;

    #[test]
    fn clap_definition_is_consistent() {
        CommandLineInterface::command().debug_assert();
    }

    #[test]
    fn literal_paths_pass_through_untouched() {
        let paths = resolve_file_path_patterns(["a/b.json", "c.json"]).unwrap();
        assert_eq!(paths, [PathBuf::from("a/b.json"), PathBuf::from("c.json")]);
    }

    #[test]
    fn unmatched_glob_is_an_error() {
        let err = resolve_file_path_patterns(["no/such/dir/*.json"]).unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }
}
