//! faxc-drv — compiler driver.
//!
//! Orchestrates the front end: reads source files, lexes, parses, and
//! binds them, then reports whatever [`faxc_util::diagnostic::Handler`]
//! collected along the way. There is no lowering past the bound tree —
//! this driver stops at the same boundary the front end itself does.
//!
//! ```text
//! Source Files
//!      │
//!      ▼
//! [faxc-lex]  ──▶ Token Stream
//!      │
//!      ▼
//! [faxc-par]  ──▶ Unbound tree (ast::Program)
//!      │
//!      ▼
//! [faxc-sem]  ──▶ Bound tree (hir::Program)
//! ```
//!
//! ```text
//! faxc main.fax                  # bind and report diagnostics
//! faxc main.fax --emit-tokens    # print the token stream
//! faxc main.fax --emit-ast       # print the unbound tree
//! faxc main.fax --emit-hir       # print the bound tree (default)
//! faxc main.fax -Werror          # treat warnings as errors
//! faxc main.fax -v               # verbose phase progress on stderr
//! ```

use std::path::PathBuf;

use faxc_util::diagnostic::Handler;
use faxc_util::span::{FileId, SourceMap};

/// What the driver should print after binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitType {
    Tokens,
    Ast,
    #[default]
    Hir,
}

/// Compiler configuration, built from command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub input_files: Vec<PathBuf>,
    pub emit: EmitType,
    pub verbose: bool,
    pub warnings_as_errors: bool,
}

impl Config {
    pub fn from_args(args: impl Iterator<Item = String>) -> Result<Config, CompileError> {
        let mut config = Config::default();
        for arg in args {
            match arg.as_str() {
                "--emit-tokens" => config.emit = EmitType::Tokens,
                "--emit-ast" => config.emit = EmitType::Ast,
                "--emit-hir" => config.emit = EmitType::Hir,
                "-v" | "--verbose" => config.verbose = true,
                "-Werror" => config.warnings_as_errors = true,
                other if other.starts_with('-') => {
                    return Err(CompileError::InvalidArguments(format!("unknown flag `{other}`")))
                }
                other => config.input_files.push(PathBuf::from(other)),
            }
        }
        if config.input_files.is_empty() {
            return Err(CompileError::InvalidArguments("no input files".to_string()));
        }
        Ok(config)
    }
}

/// One compiler invocation's state: the files it read and the diagnostics
/// every phase reported into.
pub struct Session {
    pub config: Config,
    pub sources: SourceMap,
    pub handler: Handler,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session { config, sources: SourceMap::new(), handler: Handler::new() }
    }

    pub fn compile(&mut self) -> Result<(), CompileError> {
        let file_ids = self.read_sources()?;
        let results = self.run_pipeline(&file_ids);
        self.emit_output(&results);

        let failed = self.handler.has_errors()
            || (self.config.warnings_as_errors && self.handler.warning_count() > 0);
        if failed {
            return Err(CompileError::CompilationFailed);
        }
        Ok(())
    }

    fn read_sources(&mut self) -> Result<Vec<FileId>, CompileError> {
        let mut ids = Vec::with_capacity(self.config.input_files.len());
        for path in &self.config.input_files {
            if self.config.verbose {
                eprintln!("reading: {}", path.display());
            }
            let content = std::fs::read_to_string(path)
                .map_err(|e| CompileError::IoError(path.clone(), e))?;
            ids.push(self.sources.add_file(path.display().to_string(), content));
        }
        Ok(ids)
    }

    fn run_pipeline(&mut self, file_ids: &[FileId]) -> Vec<FilePipelineResult> {
        let mut results = Vec::with_capacity(file_ids.len());
        for &id in file_ids {
            let Some(file) = self.sources.get(id) else { continue };
            let content = file.content().to_string();

            if self.config.verbose {
                eprintln!("lexing: {}", file.name());
            }
            let tokens = faxc_lex::tokenize(&content, &mut self.handler);

            if self.config.emit == EmitType::Tokens {
                results.push(FilePipelineResult::Tokens(tokens));
                continue;
            }

            if self.config.verbose {
                eprintln!("parsing: {}", file.name());
            }
            let mut parser = faxc_par::Parser::new(tokens, &mut self.handler);
            let program = parser.parse_program();

            if self.config.emit == EmitType::Ast {
                results.push(FilePipelineResult::Ast(program));
                continue;
            }

            if self.config.verbose {
                eprintln!("binding: {}", file.name());
            }
            let bound = faxc_sem::bind(program, &self.handler);
            results.push(FilePipelineResult::Hir(bound));
        }
        results
    }

    fn emit_output(&self, results: &[FilePipelineResult]) {
        for result in results {
            match result {
                FilePipelineResult::Tokens(tokens) => println!("{tokens:#?}"),
                FilePipelineResult::Ast(program) => println!("{program:#?}"),
                FilePipelineResult::Hir(program) => println!("{program:#?}"),
            }
        }
        for diagnostic in self.handler.diagnostics().iter() {
            report_diagnostic(&self.sources, diagnostic);
        }
    }
}

fn report_diagnostic(sources: &SourceMap, diagnostic: &faxc_util::diagnostic::Diagnostic) {
    let location = sources.format_span(diagnostic.span).unwrap_or_default();
    eprintln!("{:?}: {} {}", diagnostic.level, diagnostic.message, location);
}

enum FilePipelineResult {
    Tokens(Vec<(faxc_lex::Token, faxc_util::Span)>),
    Ast(faxc_par::ast::Program),
    Hir(faxc_sem::hir::Program),
}

/// Compiler error surfaced to `main`.
#[derive(Debug)]
pub enum CompileError {
    IoError(PathBuf, std::io::Error),
    CompilationFailed,
    InvalidArguments(String),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::IoError(path, e) => write!(f, "io error for {}: {}", path.display(), e),
            CompileError::CompilationFailed => write!(f, "compilation failed"),
            CompileError::InvalidArguments(s) => write!(f, "invalid arguments: {s}"),
        }
    }
}

impl std::error::Error for CompileError {}

/// CLI entry point: build a [`Config`] from `std::env::args`, then compile.
pub fn main() -> anyhow::Result<()> {
    let config = Config::from_args(std::env::args().skip(1))?;
    let mut session = Session::new(config);
    session.compile()?;
    Ok(())
}
