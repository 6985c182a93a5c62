use std::process::ExitCode;

use doctopic::errors::Diagnostics;
use doctopic::source::{Source, SourceBuffer};

use self::config::{parse_args_or_exit, DoctopicConfig};
use self::errors::print_diagnostic;

pub mod config;
mod dump;
mod errors;
mod passes;

pub enum CompilationControl {
    Continue,
    Stop,
}

pub struct PassOutput<O> {
    pub output: O,
    pub compilation_control: CompilationControl,
}

impl<O> PassOutput<O> {
    pub fn stop_with_output(output: O) -> Self {
        Self {
            output,
            compilation_control: CompilationControl::Stop,
        }
    }

    pub fn continue_with_output(output: O) -> Self {
        Self {
            output,
            compilation_control: CompilationControl::Continue,
        }
    }
}

pub struct RunnerCtx<'buf, 'emt> {
    pub config: DoctopicConfig,
    pub source: Source<'buf>,
    pub diagnostics: Diagnostics<'emt>,
}

impl RunnerCtx<'_, '_> {
    pub fn stop_if_errors<O>(&self, output: O) -> PassOutput<O> {
        PassOutput {
            output,
            compilation_control: if self.diagnostics.has_errors() {
                CompilationControl::Stop
            } else {
                CompilationControl::Continue
            },
        }
    }
}

macro_rules! return_if_stopped {
    ($ctx:expr, $e:expr) => {
        match $e {
            PassOutput {
                compilation_control: CompilationControl::Stop,
                ..
            } => {
                return if $ctx.diagnostics.has_errors() {
                    ExitCode::FAILURE
                } else {
                    ExitCode::SUCCESS
                }
            }

            PassOutput { output, .. } => output,
        }
    };
}

fn run(mut ctx: RunnerCtx<'_, '_>) -> ExitCode {
    return_if_stopped!(ctx, passes::load_files(&mut ctx));

    let files = return_if_stopped!(ctx, passes::select_languages(&mut ctx));
    let files = return_if_stopped!(ctx, passes::tokenize(&mut ctx, files));
    let files = return_if_stopped!(ctx, passes::dump_tokens_if_asked(&mut ctx, files));
    let files = return_if_stopped!(ctx, passes::highlight_if_asked(&mut ctx, files));

    let topics = return_if_stopped!(ctx, passes::discover(&mut ctx, files));
    return_if_stopped!(ctx, passes::dump_topics(&mut ctx, &topics));

    if ctx.diagnostics.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

pub fn prepare_and_run() -> ExitCode {
    let config = parse_args_or_exit();
    let mut source_buf = SourceBuffer::new();
    let source = Source::new(&mut source_buf);

    let mut diagnostics = Diagnostics::new();
    diagnostics.set_emitter(Box::new(print_diagnostic));

    let ctx = RunnerCtx {
        config,
        source,
        diagnostics,
    };

    run(ctx)
}
