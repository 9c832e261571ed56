use std::path::{Path, PathBuf};

/// List separator used by the registry values, regardless of host.
pub const SEPARATOR: char = ';';

pub const JAVA_HOME_BIN_PLACEHOLDER: &str = r"%JAVA_HOME%\bin";
pub const ORACLE_JAVAPATH_MARKER: &str = r"oracle\java\javapath";

const TOOLKIT_MARKERS: [&str; 3] = [r"\java\", r"\jdk", ORACLE_JAVAPATH_MARKER];

pub const LIBRARY_JARS: [&str; 2] = ["dt.jar", "tools.jar"];

fn normalize(entry: &str) -> String {
    entry.to_lowercase().replace('/', "\\")
}

/// True for entries that point into some JDK/JRE installation or a vendor shim.
pub fn is_toolkit_entry(entry: &str) -> bool {
    let normalized = normalize(entry);
    TOOLKIT_MARKERS
        .iter()
        .any(|marker| normalized.contains(marker))
}

fn is_home_placeholder(entry: &str) -> bool {
    entry.eq_ignore_ascii_case(JAVA_HOME_BIN_PLACEHOLDER)
}

/// Drops every JDK-related entry from `original` and puts `bin_dir` first.
///
/// Surviving entries keep their relative order.
pub fn rewrite_search_path(original: &str, bin_dir: &Path) -> String {
    let mut entries = vec![bin_dir.display().to_string()];

    entries.extend(
        original
            .split(SEPARATOR)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter(|entry| !is_home_placeholder(entry))
            .filter(|entry| !is_toolkit_entry(entry))
            .map(str::to_string),
    );

    entries.join(&SEPARATOR.to_string())
}

pub fn mentions_vendor_shim(search_path: &str) -> bool {
    search_path
        .split(SEPARATOR)
        .any(|entry| normalize(entry.trim()).contains(ORACLE_JAVAPATH_MARKER))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classpath {
    pub value: String,
    pub missing: Vec<PathBuf>,
}

/// `.;<home>\lib\dt.jar;<home>\lib\tools.jar;`
pub fn build_classpath(home: &Path) -> Classpath {
    let lib = home.join("lib");
    let jars: Vec<PathBuf> = LIBRARY_JARS.iter().map(|jar| lib.join(jar)).collect();

    let mut value = String::from(".");
    for jar in &jars {
        value.push(SEPARATOR);
        value.push_str(&jar.display().to_string());
    }
    value.push(SEPARATOR);

    let missing = jars
        .into_iter()
        .filter(|jar| !jar.is_file())
        .collect();

    Classpath { value, missing }
}
