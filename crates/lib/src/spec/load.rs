//! Reading and merging spec files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{MergePolicy, PackageSpecSet, SpecDocument, SpecError};

/// Loads the packaging specifications from the given YAML files.
///
/// File contents are joined with a newline and parsed as one document, so
/// every file contributes to the same top-level `specs` mapping. When the
/// combined content repeats a top-level key (typically each file starting
/// with `specs:`), the `specs` mappings are merged in order and a later
/// definition of a spec name replaces an earlier one.
pub fn load_specs<P: AsRef<Path>>(files: &[P]) -> Result<PackageSpecSet, SpecError> {
  load_specs_with(files, MergePolicy::Concatenate)
}

/// Loads the packaging specifications from `files` using `policy` to combine them.
pub fn load_specs_with<P: AsRef<Path>>(files: &[P], policy: MergePolicy) -> Result<PackageSpecSet, SpecError> {
  let contents = files
    .iter()
    .map(|file| read_spec_file(file.as_ref()))
    .collect::<Result<Vec<_>, _>>()?;

  debug!(files = contents.len(), %policy, "parsing spec files");

  match policy {
    MergePolicy::Concatenate => {
      let joined = contents.iter().map(|(_, c)| c.as_str()).collect::<Vec<_>>().join("\n");
      let mut merged = PackageSpecSet::new();
      for document in split_repeated_keys(&joined) {
        merged.extend(parse_specs(&document)?);
      }
      Ok(merged)
    }
    _ => {
      let mut merged = PackageSpecSet::new();
      let mut origin: BTreeMap<String, PathBuf> = BTreeMap::new();
      for (path, content) in &contents {
        let specs = parse_specs(content)?;
        merge_into(&mut merged, &mut origin, specs, path, policy)?;
      }
      Ok(merged)
    }
  }
}

fn read_spec_file(path: &Path) -> Result<(PathBuf, String), SpecError> {
  let content = fs::read_to_string(path).map_err(|source| SpecError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  Ok((path.to_path_buf(), content))
}

/// Parses one spec document. Documents holding only blank lines or comments
/// define no specs.
pub(crate) fn parse_specs(content: &str) -> Result<PackageSpecSet, SpecError> {
  if is_blank_document(content) {
    return Ok(PackageSpecSet::new());
  }
  let doc: SpecDocument = serde_yaml::from_str(content).map_err(SpecError::Parse)?;
  Ok(doc.specs)
}

/// A top-level entry of a YAML document: its key and the lines belonging to it.
struct TopLevelEntry<'a> {
  key: Option<&'a str>,
  lines: Vec<&'a str>,
}

/// Splits `content` into documents that each hold a top-level key at most once.
///
/// A new document starts wherever a key repeats. Entries other than `specs`
/// from earlier documents are carried forward when the later document doesn't
/// redefine them, so anchors declared in a shared section stay resolvable.
fn split_repeated_keys(content: &str) -> Vec<String> {
  let mut documents: Vec<Vec<TopLevelEntry<'_>>> = vec![Vec::new()];

  for line in content.lines() {
    let key = top_level_key(line);
    match key {
      Some(key) => {
        let repeated = documents
          .last()
          .is_some_and(|doc| doc.iter().any(|entry| entry.key == Some(key)));
        if repeated {
          documents.push(Vec::new());
        }
        if let Some(doc) = documents.last_mut() {
          doc.push(TopLevelEntry {
            key: Some(key),
            lines: vec![line],
          });
        }
      }
      None => {
        if let Some(doc) = documents.last_mut() {
          match doc.last_mut() {
            Some(entry) => entry.lines.push(line),
            None => doc.push(TopLevelEntry { key: None, lines: vec![line] }),
          }
        }
      }
    }
  }

  let mut carried: Vec<(&str, Vec<&str>)> = Vec::new();
  let mut rendered = Vec::with_capacity(documents.len());
  for doc in &documents {
    let mut lines: Vec<&str> = Vec::new();
    for (key, entry_lines) in &carried {
      if !doc.iter().any(|entry| entry.key == Some(*key)) {
        lines.extend(entry_lines);
      }
    }
    for entry in doc {
      lines.extend(&entry.lines);
    }
    rendered.push(lines.join("\n"));

    for entry in doc {
      if let Some(key) = entry.key.filter(|key| *key != "specs") {
        carried.retain(|(carried_key, _)| *carried_key != key);
        carried.push((key, entry.lines.clone()));
      }
    }
  }
  rendered
}

/// Returns the key if `line` opens a top-level mapping entry.
fn top_level_key(line: &str) -> Option<&str> {
  let first = line.chars().next()?;
  if first.is_whitespace() || matches!(first, '#' | '-' | ']' | '}' | '.' | '%') {
    return None;
  }
  let (key, _) = line.split_once(':')?;
  Some(key.trim().trim_matches(|c| c == '"' || c == '\''))
}

fn is_blank_document(content: &str) -> bool {
  content
    .lines()
    .map(str::trim)
    .all(|line| line.is_empty() || line.starts_with('#'))
}

fn merge_into(
  merged: &mut PackageSpecSet,
  origin: &mut BTreeMap<String, PathBuf>,
  specs: PackageSpecSet,
  path: &Path,
  policy: MergePolicy,
) -> Result<(), SpecError> {
  for (name, packages) in specs {
    if let Some(existing) = merged.get_mut(&name) {
      match policy {
        MergePolicy::ErrorOnConflict => {
          return Err(SpecError::Conflict {
            first: origin.get(&name).cloned().unwrap_or_default(),
            second: path.to_path_buf(),
            name,
          });
        }
        MergePolicy::Union => {
          existing.extend(packages);
          continue;
        }
        MergePolicy::Concatenate | MergePolicy::LastWins => {}
      }
    }
    origin.insert(name.clone(), path.to_path_buf());
    merged.insert(name, packages);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
  }

  fn names(specs: &PackageSpecSet, spec: &str) -> Vec<String> {
    specs[spec]
      .iter()
      .map(|p| p.get_str("name").unwrap_or_default().to_string())
      .collect()
  }

  #[test]
  fn loads_single_file() {
    let dir = TempDir::new().unwrap();
    let file = write(
      &dir,
      "packages.yml",
      "specs:\n  oss:\n    - name: linux-x64\n    - name: darwin-arm64\n  xpack:\n    - name: linux-x64\n",
    );

    let specs = load_specs(&[file]).unwrap();

    assert_eq!(specs.len(), 2);
    assert_eq!(names(&specs, "oss"), vec!["linux-x64", "darwin-arm64"]);
  }

  #[test]
  fn concatenates_files_sharing_one_specs_key() {
    let dir = TempDir::new().unwrap();
    let head = write(&dir, "head.yml", "specs:\n  oss:\n    - name: linux-x64");
    let tail = write(&dir, "tail.yml", "  xpack:\n    - name: windows-x64\n");

    let specs = load_specs(&[head, tail]).unwrap();

    assert_eq!(names(&specs, "oss"), vec!["linux-x64"]);
    assert_eq!(names(&specs, "xpack"), vec!["windows-x64"]);
  }

  #[test]
  fn repeated_specs_keys_merge_with_later_file_winning() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yml", "specs:\n  oss:\n    - name: a\n  xpack:\n    - name: x\n");
    let b = write(&dir, "b.yml", "specs:\n  oss:\n    - name: b\n  local:\n    - name: mine\n");

    let specs = load_specs(&[a, b]).unwrap();

    assert_eq!(names(&specs, "oss"), vec!["b"]);
    assert_eq!(names(&specs, "xpack"), vec!["x"]);
    assert_eq!(names(&specs, "local"), vec!["mine"]);
  }

  #[test]
  fn later_files_can_use_anchors_from_shared_section() {
    let dir = TempDir::new().unwrap();
    let a = write(
      &dir,
      "a.yml",
      "shared:\n  linux: &linux\n    name: linux-x64\nspecs:\n  oss:\n    - *linux\n",
    );
    let b = write(&dir, "b.yml", "specs:\n  local:\n    - *linux\n");

    let specs = load_specs(&[a, b]).unwrap();

    assert_eq!(names(&specs, "oss"), vec!["linux-x64"]);
    assert_eq!(names(&specs, "local"), vec!["linux-x64"]);
  }

  #[test]
  fn repeated_keys_with_invalid_later_file_return_parse_error() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yml", "specs:\n  oss:\n    - name: a\n");
    let b = write(&dir, "b.yml", "specs:\n  oss: [\n");

    assert!(matches!(load_specs(&[a, b]), Err(SpecError::Parse(_))));
  }

  #[test]
  fn top_level_keys_are_detected() {
    assert_eq!(top_level_key("specs:"), Some("specs"));
    assert_eq!(top_level_key("\"shared\": x"), Some("shared"));
    assert_eq!(top_level_key("  oss:"), None);
    assert_eq!(top_level_key("- name: a"), None);
    assert_eq!(top_level_key("# specs:"), None);
    assert_eq!(top_level_key(""), None);
  }

  #[test]
  fn invalid_concatenation_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yml", "specs:\n  oss: [\n");
    let b = write(&dir, "b.yml", "  - name: a\n");

    assert!(matches!(load_specs(&[a, b]), Err(SpecError::Parse(_))));
  }

  #[test]
  fn wrong_shape_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "a.yml", "specs:\n  oss: just-a-string\n");

    assert!(matches!(load_specs(&[file]), Err(SpecError::Parse(_))));
  }

  #[test]
  fn unreadable_file_returns_read_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yml");

    let err = load_specs(&[missing.clone()]).unwrap_err();

    assert!(matches!(err, SpecError::Read { ref path, .. } if *path == missing));
  }

  #[test]
  fn blank_and_keyless_documents_yield_no_specs() {
    let dir = TempDir::new().unwrap();
    let blank = write(&dir, "blank.yml", "# nothing here\n\n");
    let other = write(&dir, "other.yml", "version: 1\n");

    assert!(load_specs(&[blank]).unwrap().is_empty());
    assert!(load_specs(&[other]).unwrap().is_empty());
  }

  #[test]
  fn last_wins_replaces_earlier_definition() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yml", "specs:\n  oss:\n    - name: old\n  keep:\n    - name: k\n");
    let b = write(&dir, "b.yml", "specs:\n  oss:\n    - name: new\n");

    let specs = load_specs_with(&[a, b], MergePolicy::LastWins).unwrap();

    assert_eq!(names(&specs, "oss"), vec!["new"]);
    assert_eq!(names(&specs, "keep"), vec!["k"]);
  }

  #[test]
  fn union_appends_lists_in_file_order() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yml", "specs:\n  oss:\n    - name: first\n");
    let b = write(&dir, "b.yml", "specs:\n  oss:\n    - name: second\n");

    let specs = load_specs_with(&[a, b], MergePolicy::Union).unwrap();

    assert_eq!(names(&specs, "oss"), vec!["first", "second"]);
  }

  #[test]
  fn error_on_conflict_names_both_files() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.yml", "specs:\n  oss:\n    - name: first\n");
    let b = write(&dir, "b.yml", "specs:\n  oss:\n    - name: second\n");

    let err = load_specs_with(&[a.clone(), b.clone()], MergePolicy::ErrorOnConflict).unwrap_err();

    match err {
      SpecError::Conflict { name, first, second } => {
        assert_eq!(name, "oss");
        assert_eq!(first, a);
        assert_eq!(second, b);
      }
      other => panic!("expected conflict, got {other}"),
    }
  }

  #[test]
  fn per_file_policy_reports_parse_errors_without_partial_result() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "good.yml", "specs:\n  oss:\n    - name: a\n");
    let bad = write(&dir, "bad.yml", "specs: [unterminated\n");

    assert!(matches!(
      load_specs_with(&[good, bad], MergePolicy::LastWins),
      Err(SpecError::Parse(_))
    ));
  }
}
