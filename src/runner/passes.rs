use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use doctopic::language::registry::languages;
use doctopic::language::Language;
use doctopic::render::render_highlighted;
use doctopic::source::SourceId;
use doctopic::tokenize::Tokenizer;

use super::config::OutputFormat;
use super::dump::{dump_prototypes, dump_ron, dump_tokens, dump_topics_plain, FileTopics};
use super::{PassOutput, RunnerCtx};

pub struct SelectedFile {
    pub id: SourceId,
    pub language: &'static dyn Language,
}

pub struct TokenizedFile {
    pub path: PathBuf,
    pub language: &'static dyn Language,
    pub tokenizer: Tokenizer,
}

pub fn load_files(ctx: &mut RunnerCtx<'_, '_>) -> PassOutput<()> {
    for path in &ctx.config.paths {
        if let Err(e) = ctx.source.load(path.clone()) {
            ctx.diagnostics
                .error()
                .with_location(path.display().to_string())
                .with_message("could not load the file")
                .with_source(Box::new(e))
                .emit();
        }
    }

    ctx.stop_if_errors(())
}

pub fn select_languages(ctx: &mut RunnerCtx<'_, '_>) -> PassOutput<Vec<SelectedFile>> {
    let registry = languages();

    let forced = match &ctx.config.language {
        Some(name) => match registry.get(name) {
            Some(language) => Some(language),

            None => {
                ctx.diagnostics
                    .error()
                    .with_message(format!("unknown language `{}`", name))
                    .emit();

                return PassOutput::stop_with_output(vec![]);
            }
        },

        None => None,
    };

    let mut selected = Vec::with_capacity(ctx.source.len());

    for file in ctx.source.iter() {
        match forced.or_else(|| registry.for_path(file.path())) {
            Some(language) => selected.push(SelectedFile {
                id: file.id(),
                language,
            }),

            None => ctx
                .diagnostics
                .warn()
                .with_location(file.path().display().to_string())
                .with_message("no language is associated with this file, skipping it")
                .emit(),
        }
    }

    ctx.stop_if_errors(selected)
}

pub fn tokenize(
    ctx: &mut RunnerCtx<'_, '_>,
    selected: Vec<SelectedFile>,
) -> PassOutput<Vec<TokenizedFile>> {
    let files = selected
        .into_iter()
        .filter_map(|SelectedFile { id, language }| {
            let file = ctx.source.get(id)?;
            let tokenizer = Tokenizer::with_tab_width(file.text(), ctx.config.tab_width);

            debug!(
                path = %file.path().display(),
                language = language.name(),
                tokens = tokenizer.len(),
                "tokenized a file"
            );

            Some(TokenizedFile {
                path: file.path().to_owned(),
                language,
                tokenizer,
            })
        })
        .collect();

    PassOutput::continue_with_output(files)
}

pub fn dump_tokens_if_asked(
    ctx: &mut RunnerCtx<'_, '_>,
    files: Vec<TokenizedFile>,
) -> PassOutput<Vec<TokenizedFile>> {
    if ctx.config.format != OutputFormat::Tokens {
        return PassOutput::continue_with_output(files);
    }

    for file in &files {
        if let Err(e) = dump_tokens(&file.path, &file.tokenizer, io::stdout().lock()) {
            ctx.diagnostics
                .error()
                .with_message("could not dump the tokens to stdout")
                .with_source(Box::new(e))
                .emit();
        }
    }

    PassOutput::stop_with_output(files)
}

pub fn highlight_if_asked(
    ctx: &mut RunnerCtx<'_, '_>,
    files: Vec<TokenizedFile>,
) -> PassOutput<Vec<TokenizedFile>> {
    if ctx.config.format != OutputFormat::Highlight {
        return PassOutput::continue_with_output(files);
    }

    for file in &files {
        file.language.syntax_highlight(&file.tokenizer);

        if let Err(e) = io::stdout()
            .lock()
            .write_all(render_highlighted(&file.tokenizer, true).as_bytes())
        {
            ctx.diagnostics
                .error()
                .with_message("could not write the highlighted source to stdout")
                .with_source(Box::new(e))
                .emit();
        }
    }

    PassOutput::stop_with_output(files)
}

pub fn discover(
    ctx: &mut RunnerCtx<'_, '_>,
    files: Vec<TokenizedFile>,
) -> PassOutput<Vec<FileTopics>> {
    let topics = files
        .into_iter()
        .map(|file| {
            let topics = file.language.discover_elements(&file.tokenizer);
            debug!(path = %file.path.display(), topics = topics.len(), "discovered topics");

            if topics.is_empty() {
                ctx.diagnostics
                    .info()
                    .with_location(file.path.display().to_string())
                    .with_message(format!("found no {} topics", file.language.name()))
                    .emit();
            }

            FileTopics {
                path: file.path,
                topics,
            }
        })
        .collect();

    ctx.stop_if_errors(topics)
}

pub fn dump_topics(ctx: &mut RunnerCtx<'_, '_>, files: &[FileTopics]) -> PassOutput<()> {
    let out = io::stdout().lock();

    let result = match ctx.config.format {
        OutputFormat::Ron => dump_ron(files, out),
        OutputFormat::Prototypes => dump_prototypes(files, out),
        OutputFormat::Topics | OutputFormat::Tokens | OutputFormat::Highlight => {
            dump_topics_plain(files, out)
        }
    };

    if let Err(e) = result {
        ctx.diagnostics
            .error()
            .with_message("could not dump the topics to stdout")
            .with_source(Box::new(e))
            .emit();
    }

    ctx.stop_if_errors(())
}
