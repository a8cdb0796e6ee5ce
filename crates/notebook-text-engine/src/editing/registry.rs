/// Lookup of known cell types, injected wherever a default or canonical type
/// is needed.
pub trait CellTypeRegistry {
    /// Type given to a new cell when nothing else decides it.
    fn default_cell_type(&self) -> &str;

    /// Resolves an alias (`js`) to its canonical name (`javascript`).
    /// Unknown names are returned unchanged.
    fn canonical_name(&self, name: &str) -> String;

    fn is_registered(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellTypeDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

const BUILTIN: &[CellTypeDefinition] = &[
    CellTypeDefinition {
        name: "markdown",
        aliases: &["md"],
        description: "Markdown",
    },
    CellTypeDefinition {
        name: "javascript",
        aliases: &["js"],
        description: "JavaScript",
    },
    CellTypeDefinition {
        name: "css",
        aliases: &[],
        description: "CSS",
    },
    CellTypeDefinition {
        name: "html",
        aliases: &[],
        description: "HTML",
    },
    CellTypeDefinition {
        name: "latex",
        aliases: &["tex"],
        description: "LaTeX",
    },
    CellTypeDefinition {
        name: "python",
        aliases: &["py"],
        description: "Python",
    },
    CellTypeDefinition {
        name: "esm",
        aliases: &[],
        description: "JavaScript module",
    },
    CellTypeDefinition {
        name: "plaintext",
        aliases: &["text", "raw"],
        description: "Plain text",
    },
];

/// The cell types a stock notebook knows about.
#[derive(Debug, Clone)]
pub struct BuiltinCellTypes {
    default_type: String,
}

impl BuiltinCellTypes {
    pub fn new() -> Self {
        Self {
            default_type: "markdown".to_string(),
        }
    }

    /// Uses `default_type` (canonicalized) for new cells instead of markdown.
    pub fn with_default(default_type: &str) -> Self {
        let mut registry = Self::new();
        registry.default_type = registry.canonical_name(default_type);
        registry
    }

    pub fn definitions(&self) -> &'static [CellTypeDefinition] {
        BUILTIN
    }

    pub fn get(&self, name: &str) -> Option<&'static CellTypeDefinition> {
        BUILTIN
            .iter()
            .find(|d| d.name == name || d.aliases.contains(&name))
    }
}

impl Default for BuiltinCellTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl CellTypeRegistry for BuiltinCellTypes {
    fn default_cell_type(&self) -> &str {
        &self.default_type
    }

    fn canonical_name(&self, name: &str) -> String {
        self.get(name)
            .map_or(name, |definition| definition.name)
            .to_string()
    }

    fn is_registered(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
