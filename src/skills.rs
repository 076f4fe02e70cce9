//! Skill metadata: the front-matter header of a `Skill.md` file and the
//! `<available_skills>` markup built from it.
//!
//! A skill document starts with a header block fenced by `---` lines:
//!
//! ```text
//! ---
//! name: summarize
//! description: Condense a document into bullet points
//! ---
//! Body text...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

const DELIMITER: &str = "---";
const SKILL_FILE: &str = "Skill.md";

/// Errors raised while reading a skill's front matter.
#[derive(Error, Debug)]
pub enum SkillError {
	#[error("Skill file not found: {0}")]
	NotFound(PathBuf),

	#[error("Failed to read skill file '{path}': {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Skill file is empty")]
	Empty,

	#[error("Skill file does not start with a '---' line")]
	MissingOpeningDelimiter,

	#[error("Skill front matter is never closed by a '---' line")]
	MissingClosingDelimiter,

	#[error("Failed to parse skill front matter: {0}")]
	InvalidYaml(String),

	#[error("Skill front matter must be a mapping")]
	NotAMapping,

	#[error("Skill front matter is missing the '{0}' field")]
	MissingField(&'static str),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkillMetadata {
	pub name: String,
	pub description: String,
	pub location: String,
	/// The whole header, including the fields above.
	pub fields: Mapping,
}

fn text_field(fields: &Mapping, key: &'static str) -> Result<String, SkillError> {
	match fields.get(key) {
		Some(Value::String(s)) => Ok(s.clone()),
		Some(Value::Number(n)) => Ok(n.to_string()),
		Some(Value::Bool(b)) => Ok(b.to_string()),
		_ => Err(SkillError::MissingField(key)),
	}
}

/// Parses the front matter of `text`. `location` fills in the `location`
/// field when the header does not set one.
pub fn parse_front_matter(text: &str, location: &str) -> Result<SkillMetadata, SkillError> {
	let lines: Vec<&str> = text.lines().collect();
	let first = lines.first().ok_or(SkillError::Empty)?;
	if first.trim() != DELIMITER {
		return Err(SkillError::MissingOpeningDelimiter);
	}
	let end = lines
		.iter()
		.skip(1)
		.position(|l| l.trim() == DELIMITER)
		.map(|i| i + 1)
		.ok_or(SkillError::MissingClosingDelimiter)?;

	let header = lines[1..end].join("\n");
	let value: Value =
		serde_yaml::from_str(&header).map_err(|e| SkillError::InvalidYaml(e.to_string()))?;
	let mut fields = match value {
		Value::Null => Mapping::new(),
		Value::Mapping(m) => m,
		_ => return Err(SkillError::NotAMapping),
	};

	if !fields.contains_key("location") {
		fields.insert("location".into(), location.into());
	}

	Ok(SkillMetadata {
		name: text_field(&fields, "name")?,
		description: text_field(&fields, "description")?,
		location: text_field(&fields, "location")?,
		fields,
	})
}

/// Reads `<dir>/Skill.md` and parses its front matter.
pub fn load_skill_metadata(dir: impl AsRef<Path>) -> Result<SkillMetadata, SkillError> {
	let path = dir.as_ref().join(SKILL_FILE);
	if !path.exists() {
		return Err(SkillError::NotFound(path));
	}
	let text = fs::read_to_string(&path).map_err(|source| SkillError::Io {
		path: path.clone(),
		source,
	})?;
	let location = path.to_string_lossy().replace('\\', "/");
	parse_front_matter(&text, &location)
}

fn escape(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

fn skill_node(skill: &SkillMetadata, indent: &str) -> String {
	format!(
		"{indent}<skill>\n\
		 {indent}  <name>{}</name>\n\
		 {indent}  <description>{}</description>\n\
		 {indent}  <location>{}</location>\n\
		 {indent}</skill>",
		escape(&skill.name),
		escape(&skill.description),
		escape(&skill.location),
	)
}

pub fn render_skill_xml(skill: &SkillMetadata) -> String {
	render_skills_xml(std::slice::from_ref(skill))
}

/// `<available_skills>` block listing every skill; empty input gives an
/// empty string.
pub fn render_skills_xml(skills: &[SkillMetadata]) -> String {
	if skills.is_empty() {
		return String::new();
	}
	let body: Vec<String> = skills.iter().map(|s| skill_node(s, "  ")).collect();
	format!("<available_skills>\n{}\n</available_skills>", body.join("\n"))
}
