use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ron::ser::PrettyConfig;
use serde::Serialize;

use doctopic::render::render_prototype;
use doctopic::tokenize::Tokenizer;
use doctopic::topic::Topic;

#[derive(Serialize, Debug)]
pub struct FileTopics {
    pub path: PathBuf,
    pub topics: Vec<Topic>,
}

pub fn dump_tokens(path: &Path, tokenizer: &Tokenizer, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "# {}", path.display())?;

    for (index, token) in tokenizer.tokens().iter().enumerate() {
        writeln!(
            out,
            "#{} {} {:?}",
            token.line(),
            token.ty,
            tokenizer.token_text(index)
        )?;
    }

    Ok(())
}

fn write_topic_header(path: &Path, topic: &Topic, out: &mut impl Write) -> io::Result<()> {
    write!(out, "{}:{}: {}", path.display(), topic.line_number(), topic)?;

    if topic.is_embedded() {
        write!(out, " (embedded)")?;
    }

    writeln!(out)
}

pub fn dump_topics_plain(files: &[FileTopics], mut out: impl Write) -> io::Result<()> {
    for file in files {
        for topic in &file.topics {
            write_topic_header(&file.path, topic, &mut out)?;
        }
    }

    Ok(())
}

pub fn dump_prototypes(files: &[FileTopics], mut out: impl Write) -> io::Result<()> {
    for file in files {
        for topic in &file.topics {
            write_topic_header(&file.path, topic, &mut out)?;

            let Some(prototype) = topic.prototype() else {
                continue;
            };

            for line in render_prototype(prototype, true).lines() {
                writeln!(out, "  {}", line)?;
            }

            writeln!(out)?;
        }
    }

    Ok(())
}

pub fn dump_ron(files: &[FileTopics], mut out: impl Write) -> io::Result<()> {
    let text = ron::ser::to_string_pretty(files, PrettyConfig::default())
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    writeln!(out, "{}", text)
}
