#![allow(dead_code)]

use doctopic::prototype::ParsedPrototype;
use doctopic::tokenize::{PrototypeRole, SyntaxRole, Tokenizer};

/// Groups consecutive tokens with the same prototype role, dropping untagged runs and trimming
/// each group's text.
pub fn prototype_runs(tokenizer: &Tokenizer) -> Vec<(PrototypeRole, String)> {
    runs(tokenizer, |index| tokenizer.prototype_role(index))
        .into_iter()
        .filter(|(role, _)| *role != PrototypeRole::Null)
        .collect()
}

pub fn syntax_runs(tokenizer: &Tokenizer) -> Vec<(SyntaxRole, String)> {
    runs(tokenizer, |index| tokenizer.syntax_role(index))
        .into_iter()
        .filter(|(role, _)| *role != SyntaxRole::Null)
        .collect()
}

fn runs<R: Copy + PartialEq>(
    tokenizer: &Tokenizer,
    role_of: impl Fn(usize) -> R,
) -> Vec<(R, String)> {
    let mut result: Vec<(R, usize, usize)> = vec![];

    for index in 0..tokenizer.len() {
        let role = role_of(index);

        match result.last_mut() {
            Some((last, _, end)) if *last == role => *end = index + 1,
            _ => result.push((role, index, index + 1)),
        }
    }

    result
        .into_iter()
        .map(|(role, start, end)| (role, tokenizer.text_between(start, end).trim().to_owned()))
        .filter(|(_, text)| !text.is_empty())
        .collect()
}

/// Returns the text of every parameter of every section.
pub fn parameters(prototype: &ParsedPrototype) -> Vec<Vec<String>> {
    (0..prototype.sections().len())
        .map(|section| {
            (0..prototype.sections()[section].len())
                .filter_map(|parameter| prototype.parameter_text(section, parameter))
                .map(str::to_owned)
                .collect()
        })
        .collect()
}

pub fn run(role: PrototypeRole, text: &str) -> (PrototypeRole, String) {
    (role, text.to_owned())
}
