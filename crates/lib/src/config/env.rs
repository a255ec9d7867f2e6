//! `PKGPLAN__SECTION__KEY` environment overrides.

use toml::{Table, Value};

/// Applies every `{prefix}{separator}...` variable onto `table`.
///
/// The remainder of the name, split on `separator` and lowercased, is the
/// path of the key to set (`PKGPLAN__STACK__VERSION` sets `stack.version`).
pub fn apply_env_overrides(table: &mut Table, prefix: &str, separator: &str) {
  let prefix_with_sep = format!("{}{}", prefix, separator);
  let mut vars: Vec<(String, String)> = std::env::vars().collect();
  vars.sort();

  for (key, value) in vars {
    let Some(path_str) = key.strip_prefix(&prefix_with_sep) else {
      continue;
    };
    if path_str.is_empty() {
      continue;
    }
    let path: Vec<String> = path_str.split(separator).map(|s| s.to_lowercase()).collect();
    if path.iter().any(String::is_empty) {
      continue;
    }
    set_at_path(table, &path, coerce_value(&value));
  }
}

fn set_at_path(table: &mut Table, path: &[String], value: Value) {
  let Some((first, rest)) = path.split_first() else {
    return;
  };

  if rest.is_empty() {
    table.insert(first.clone(), value);
    return;
  }

  if !matches!(table.get(first), Some(Value::Table(_))) {
    table.insert(first.clone(), Value::Table(Table::new()));
  }
  if let Some(Value::Table(nested)) = table.get_mut(first) {
    set_at_path(nested, rest, value);
  }
}

/// Interprets `raw` as a TOML value (booleans, numbers, arrays), falling
/// back to a plain string.
fn coerce_value(raw: &str) -> Value {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Value::String(raw.to_string());
  }
  format!("v = {}", trimmed)
    .parse::<Table>()
    .ok()
    .and_then(|mut t| t.remove("v"))
    .unwrap_or_else(|| Value::String(raw.to_string()))
}

/// Recursively merges `overlay` into `base`. Tables merge key by key; any
/// other value replaces what was there.
pub fn deep_merge(base: &mut Table, overlay: Table) {
  for (key, value) in overlay {
    match (base.get_mut(&key), value) {
      (Some(Value::Table(base_table)), Value::Table(overlay_table)) => {
        deep_merge(base_table, overlay_table);
      }
      (_, value) => {
        base.insert(key, value);
      }
    }
  }
}
