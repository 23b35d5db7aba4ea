//! Gradle fixture generation
//!
//! Turns a verified coordinate list into build-script text for benchmark
//! projects: a `dependencies { ... }` block and a list of `include(...)` lines
//! for `settings.gradle`.

/// Indentation of declarations inside the dependencies block
const INDENT: &str = "  ";

/// Render a Gradle `dependencies` block declaring every coordinate
pub fn dependency_block<I, S>(coordinates: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut block = String::from("dependencies {\n");
    for coordinate in coordinates {
        let coordinate = coordinate.as_ref().trim();
        if coordinate.is_empty() {
            continue;
        }
        block.push_str(&format!("{}implementation \"{}\"\n", INDENT, coordinate));
    }
    block.push_str("}\n");
    block
}

/// Render `include("project0")` .. `include("project{count-1}")`
pub fn settings_includes(count: usize) -> String {
    (0..count)
        .map(|i| format!("include(\"project{}\")\n", i))
        .collect()
}
