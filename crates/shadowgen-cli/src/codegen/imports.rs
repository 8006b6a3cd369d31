//! Import resolution for one Java compilation unit.
//!
//! Every referenced class is spelled either by its simple name (same package,
//! `java.lang`, or imported) or fully qualified when its simple name is
//! already taken by another class. Nested classes are imported through their
//! top-level class and spelled `Outer.Inner`.

use shadowgen_core::QualifiedName;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone)]
pub struct Imports {
    /// Top-level simple name -> the class it denotes in this file
    visible: HashMap<String, QualifiedName>,
    imported: BTreeSet<String>,
}

impl Imports {
    /// Resolve `names` for a file in `package` declaring `declared`
    pub fn resolve<'n>(
        package: &str,
        declared: &QualifiedName,
        names: impl IntoIterator<Item = &'n QualifiedName>,
    ) -> Self {
        let mut imports = Self {
            visible: HashMap::new(),
            imported: BTreeSet::new(),
        };
        imports.claim(&declared.top_level());

        let tops: BTreeSet<QualifiedName> = names.into_iter().map(|n| n.top_level()).collect();
        let (implicit, explicit): (Vec<_>, Vec<_>) = tops
            .into_iter()
            .partition(|name| name.package() == package || name.package() == "java.lang");

        for name in implicit {
            imports.claim(&name);
        }
        for name in explicit {
            if imports.claim(&name) {
                imports.imported.insert(name.to_string());
            }
        }
        imports
    }

    fn claim(&mut self, top_level: &QualifiedName) -> bool {
        let simple = top_level.simple_name().to_string();
        match self.visible.get(&simple) {
            Some(existing) => existing == top_level,
            None => {
                self.visible.insert(simple, top_level.clone());
                true
            }
        }
    }

    /// How `name` is written in this file
    pub fn spell(&self, name: &QualifiedName) -> String {
        let top = name.top_level();
        match self.visible.get(top.simple_name()) {
            Some(visible) if visible == &top => name.relative_name(),
            _ => name.to_string(),
        }
    }

    /// Import lines' class names, sorted
    pub fn imported(&self) -> impl Iterator<Item = &str> {
        self.imported.iter().map(String::as_str)
    }
}
