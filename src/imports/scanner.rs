//! Class-header scanner for include files.

use super::ComponentCategory;
use super::builtins::is_known_base;
use super::lexer::{PyToken, Token, tokenize};
use indexmap::IndexMap;
use smol_str::SmolStr;
use std::path::{Path, PathBuf};

/// What an include file declares.
///
/// Built by reading `class Name(Base, ...):` headers without executing the
/// file. Classes deriving from a known base (or from a class already
/// classified earlier in the same file) are sorted into parameter, recorder
/// and node names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRecord {
    /// The scanned file, when scanned from disk.
    pub path: Option<PathBuf>,
    /// Whether the file exists.
    pub exists: bool,
    /// Whether every class header could be read.
    pub parse_ok: bool,
    pub parameter_names: Vec<SmolStr>,
    pub recorder_names: Vec<SmolStr>,
    pub node_names: Vec<SmolStr>,
    /// Every class found, with its declared base-class names.
    pub base_classes: IndexMap<SmolStr, Vec<SmolStr>>,
}

impl ImportRecord {
    fn missing(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            ..Self::default()
        }
    }

    /// Names classified under `category`.
    pub fn names(&self, category: ComponentCategory) -> &[SmolStr] {
        match category {
            ComponentCategory::Parameter => &self.parameter_names,
            ComponentCategory::Recorder => &self.recorder_names,
            ComponentCategory::Node => &self.node_names,
        }
    }

    /// The category a class was assigned to, if any.
    pub fn category_of(&self, class_name: &str) -> Option<ComponentCategory> {
        ComponentCategory::PRIORITY
            .into_iter()
            .find(|category| self.names(*category).iter().any(|n| n == class_name))
    }

    /// Every classified class, with its category, in priority order.
    pub fn components(&self) -> impl Iterator<Item = (ComponentCategory, &str)> + '_ {
        ComponentCategory::PRIORITY.into_iter().flat_map(move |category| {
            self.names(category)
                .iter()
                .map(move |name| (category, name.as_str()))
        })
    }

    fn names_mut(&mut self, category: ComponentCategory) -> &mut Vec<SmolStr> {
        match category {
            ComponentCategory::Parameter => &mut self.parameter_names,
            ComponentCategory::Recorder => &mut self.recorder_names,
            ComponentCategory::Node => &mut self.node_names,
        }
    }
}

/// Scan a source file on disk.
///
/// A missing file yields `exists == false`; an unreadable or malformed file
/// yields `parse_ok == false`. Neither is an error.
pub fn scan_source_file(path: impl AsRef<Path>) -> ImportRecord {
    let path = path.as_ref();
    if !path.is_file() {
        return ImportRecord::missing(path.to_path_buf());
    }
    let mut record = match std::fs::read_to_string(path) {
        Ok(source) => scan_source(&source),
        Err(e) => {
            tracing::warn!("Cannot read include {}: {}", path.display(), e);
            ImportRecord::default()
        }
    };
    record.path = Some(path.to_path_buf());
    record.exists = true;
    record
}

/// Scan source text.
pub fn scan_source(source: &str) -> ImportRecord {
    let mut record = ImportRecord {
        exists: true,
        ..ImportRecord::default()
    };
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(offset) => {
            tracing::debug!("Include source does not tokenize at byte {}", offset);
            return record;
        }
    };

    let mut cursor = Cursor::new(&tokens);
    let mut ok = true;
    while let Some(token) = cursor.bump() {
        if token.kind != PyToken::Class {
            continue;
        }
        match read_class_header(&mut cursor) {
            Some((name, bases)) => classify(&mut record, name, bases),
            None => ok = false,
        }
    }
    record.parse_ok = ok;
    record
}

fn classify(record: &mut ImportRecord, name: SmolStr, bases: Vec<SmolStr>) {
    let category = ComponentCategory::PRIORITY.into_iter().find(|category| {
        bases.iter().any(|base| {
            is_known_base(*category, base) || record.names(*category).contains(base)
        })
    });
    if let Some(category) = category {
        record.names_mut(category).push(name.clone());
    }
    record.base_classes.insert(name, bases);
}

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn eat(&mut self, kind: PyToken) -> bool {
        if self.peek().is_some_and(|t| t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
}

/// Read `Name [(args)] :` after the `class` keyword.
fn read_class_header(cursor: &mut Cursor<'_, '_>) -> Option<(SmolStr, Vec<SmolStr>)> {
    let name = cursor.bump().filter(|t| t.kind == PyToken::Ident)?;
    if !is_identifier(name.text) {
        return None;
    }
    let mut bases = Vec::new();
    if cursor.eat(PyToken::LParen) {
        for argument in read_arguments(cursor)? {
            if let Some(base) = base_name(&argument) {
                bases.push(SmolStr::new(base));
            }
        }
    }
    cursor.eat(PyToken::Colon).then(|| (SmolStr::new(name.text), bases))
}

/// Collect top-level comma separated arguments up to the matching `)`.
fn read_arguments<'a>(cursor: &mut Cursor<'_, 'a>) -> Option<Vec<Vec<Token<'a>>>> {
    let mut arguments = Vec::new();
    let mut current = Vec::new();
    let mut depth = 0usize;
    loop {
        let token = *cursor.bump()?;
        match token.kind {
            PyToken::LParen | PyToken::LBracket => depth += 1,
            PyToken::RParen | PyToken::RBracket if depth > 0 => depth -= 1,
            PyToken::RParen => break,
            PyToken::RBracket => return None,
            PyToken::Comma if depth == 0 => {
                arguments.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(token);
    }
    if !current.is_empty() {
        arguments.push(current);
    }
    Some(arguments)
}

/// The last segment of a dotted name, or `None` for keyword arguments and
/// anything that is not a plain dotted name.
fn base_name<'a>(argument: &[Token<'a>]) -> Option<&'a str> {
    let mut last = None;
    for (i, token) in argument.iter().enumerate() {
        let expected = if i % 2 == 0 { PyToken::Ident } else { PyToken::Dot };
        if token.kind != expected {
            return None;
        }
        if token.kind == PyToken::Ident {
            last = Some(token.text);
        }
    }
    if argument.len() % 2 == 0 {
        return None;
    }
    last
}

/// Whether `name` is a valid Python identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}
