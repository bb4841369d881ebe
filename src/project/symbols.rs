//! Project-wide symbol table.
//!
//! Merges the [`FileSymbols`] of every file into name-indexed maps and answers the queries an editor needs:
//! "is this a function / structure / type", "what overloads does this function have", "which variables are in
//! scope here".
//!
//! ## Notes
//! - Functions accumulate overloads across files; everything else is first-definition-wins.
//! - Scopes stay in the per-file [`ScopeArena`] that produced them. The table only indexes, per file, which root
//!   scopes belong to registered function overloads.
//! - Two paths may share a case-insensitive key (`A.epoch` and `a.epoch` on a case-sensitive disk). Each merged
//!   file keeps its own arena under that key, and lookups consult all of them.
//! - Name lookups are case-sensitive; file lookups are case-insensitive.

use std::collections::HashMap;
use std::path::Path;

use epoch_core::lang::types;
use epoch_syntax::ast::{
    FileSymbols, FunctionOverload, FunctionSignature, StrongAlias, Structure, StructureMember, SumType, Variable,
    WeakAlias,
};
use epoch_syntax::scope::{ScopeArena, ScopeId};
use epoch_syntax::source::normalize_path;

/// Scopes contributed by one file.
#[derive(Debug, Clone, Default)]
struct FileScopes {
    arena: ScopeArena,
    /// Function body scopes, in registration order.
    indexed: Vec<ScopeId>,
}

/// All symbols known to a project generation.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    functions: HashMap<String, FunctionSignature>,
    structures: HashMap<String, Structure>,
    sum_types: HashMap<String, SumType>,
    strong_aliases: HashMap<String, StrongAlias>,
    weak_aliases: HashMap<String, WeakAlias>,
    globals: Vec<Variable>,
    scopes: HashMap<String, Vec<FileScopes>>,
    file_count: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Merge everything one file contributed.
    pub fn merge_file(&mut self, file: FileSymbols) {
        self.file_count += 1;
        self.scopes
            .entry(file.file.key().to_string())
            .or_default()
            .push(FileScopes {
                arena: file.scopes,
                indexed: Vec::new(),
            });

        for function in file.functions {
            self.register_function(function);
        }
        for structure in file.structures {
            self.register_structure_type(structure);
        }
        for sum in file.sum_types {
            self.register_sum_type(sum);
        }
        for alias in file.strong_aliases {
            self.register_strong_alias(alias);
        }
        for alias in file.weak_aliases {
            self.register_weak_alias(alias);
        }
        for global in file.globals {
            self.register_global_variable(global);
        }
    }

    /// Add a function, appending its overloads to any existing entry with the same name.
    ///
    /// Each overload's body scope is indexed into the arena most recently merged for its file. Scopes of a file
    /// that was never merged have no arena to resolve against and are not indexed.
    pub fn register_function(&mut self, function: FunctionSignature) {
        for overload in &function.overloads {
            let Some(scope) = overload.scope else { continue };
            match self.scopes.get_mut(overload.file.key()).and_then(|arenas| arenas.last_mut()) {
                Some(latest) => latest.indexed.push(scope),
                None => tracing::debug!(file = %overload.file, "function scope has no merged file"),
            }
        }
        match self.functions.get_mut(&function.name) {
            Some(existing) => existing.overloads.extend(function.overloads),
            None => {
                self.functions.insert(function.name.clone(), function);
            }
        }
    }

    pub fn register_global_variable(&mut self, variable: Variable) {
        self.globals.push(variable);
    }

    /// Register a structure; a later definition with the same name is ignored.
    pub fn register_structure_type(&mut self, structure: Structure) {
        let name = structure.name.text.clone();
        if self.structures.contains_key(&name) {
            tracing::debug!(%name, "ignoring duplicate structure definition");
            return;
        }
        self.structures.insert(name, structure);
    }

    /// Register a sum type; a later definition with the same name is ignored.
    pub fn register_sum_type(&mut self, sum: SumType) {
        self.sum_types.entry(sum.name.text.clone()).or_insert(sum);
    }

    /// Register a strong alias; a later definition with the same name is ignored.
    pub fn register_strong_alias(&mut self, alias: StrongAlias) {
        self.strong_aliases.entry(alias.name.text.clone()).or_insert(alias);
    }

    /// Register a weak alias; a later definition with the same name is ignored.
    pub fn register_weak_alias(&mut self, alias: WeakAlias) {
        self.weak_aliases.entry(alias.name.text.clone()).or_insert(alias);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn is_structure(&self, name: &str) -> bool {
        self.structures.contains_key(name)
    }

    /// Return `true` for builtin types, structures, sum types and aliases.
    pub fn is_type(&self, name: &str) -> bool {
        types::is_builtin(name)
            || self.structures.contains_key(name)
            || self.sum_types.contains_key(name)
            || self.strong_aliases.contains_key(name)
            || self.weak_aliases.contains_key(name)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    pub fn structure(&self, name: &str) -> Option<&Structure> {
        self.structures.get(name)
    }

    pub fn sum_type(&self, name: &str) -> Option<&SumType> {
        self.sum_types.get(name)
    }

    pub fn strong_alias(&self, name: &str) -> Option<&StrongAlias> {
        self.strong_aliases.get(name)
    }

    pub fn weak_alias(&self, name: &str) -> Option<&WeakAlias> {
        self.weak_aliases.get(name)
    }

    /// Members of a structure, or an empty slice if the name is not a structure.
    pub fn structure_members(&self, name: &str) -> &[StructureMember] {
        self.structures.get(name).map_or(&[], |s| s.members.as_slice())
    }

    pub fn globals(&self) -> &[Variable] {
        &self.globals
    }

    /// All overloads of all functions, ordered by function name and then registration order.
    pub fn function_signatures(&self) -> Vec<&FunctionOverload> {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        names
            .into_iter()
            .filter_map(|name| self.functions.get(name))
            .flat_map(|f| f.overloads.iter())
            .collect()
    }

    /// Sorted names of every user-defined type.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .structures
            .keys()
            .chain(self.sum_types.keys())
            .chain(self.strong_aliases.keys())
            .chain(self.weak_aliases.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Variables visible at `(line, column)` in `path`.
    ///
    /// Globals come first, then the variables of every function-body scope containing the position, outermost
    /// first. Unknown files see only globals.
    pub fn available_variables(&self, path: &Path, line: u32, column: u32) -> Vec<&Variable> {
        let mut out: Vec<&Variable> = self.globals.iter().collect();
        for file in self.scopes.get(&normalize_path(path)).into_iter().flatten() {
            file.arena.visible_from(&file.indexed, line, column, &mut out);
        }
        out
    }

    /// Number of files merged into this table.
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epoch_syntax::parser::parse_file;
    use epoch_syntax::source::SourceFile;
    use std::sync::Arc;

    fn table(files: &[(&str, &str)]) -> SymbolTable {
        let mut table = SymbolTable::new();
        for (path, source) in files {
            let symbols = parse_file(source, Arc::new(SourceFile::new(*path))).unwrap();
            table.merge_file(symbols);
        }
        table
    }

    #[test]
    fn test_overloads_accumulate_across_files() {
        let t = table(&[
            ("a.epoch", "show : integer i\nshow : string s"),
            ("b.epoch", "show : boolean b"),
        ]);
        assert_eq!(t.function("show").map(|f| f.overloads.len()), Some(3));
        assert_eq!(t.function_count(), 1);
        assert_eq!(t.file_count(), 2);
    }

    #[test]
    fn test_types_are_first_definition_wins() {
        let t = table(&[
            ("a.epoch", "structure point : integer x"),
            ("b.epoch", "structure point : real x, real y"),
        ]);
        assert_eq!(t.structure_members("point").len(), 1);
        assert!(t.is_structure("point"));
        assert!(t.is_type("point"));
    }

    #[test]
    fn test_is_type_covers_builtins_and_aliases() {
        let t = table(&[("a.epoch", "type meters : real\nalias count = integer\ntype shape : circle | square")]);
        assert!(t.is_type("integer"));
        assert!(t.is_type("nothing"));
        assert!(t.is_type("meters"));
        assert!(t.is_type("count"));
        assert!(t.is_type("shape"));
        assert!(!t.is_type("circle"));
        assert!(!t.is_function("meters"));
        assert_eq!(t.type_names(), ["count", "meters", "shape"]);
    }

    #[test]
    fn test_unknown_structure_has_no_members() {
        assert!(SymbolTable::new().structure_members("nope").is_empty());
    }

    #[test]
    fn test_available_variables_are_scoped_per_file() {
        let t = table(&[
            ("One.epoch", "global { integer limit = 10 }\nf : integer a { integer b = a }"),
            ("two.epoch", "g : integer c { integer d = c }"),
        ]);
        let names = |path: &str, line, col| -> Vec<String> {
            t.available_variables(Path::new(path), line, col)
                .iter()
                .map(|v| v.name().to_string())
                .collect()
        };
        assert_eq!(names("one.epoch", 1, 20), ["limit", "a", "b"]);
        assert_eq!(names("ONE.EPOCH", 0, 0), ["limit"]);
        assert_eq!(names("two.epoch", 0, 20), ["limit", "c", "d"]);
        assert_eq!(names("missing.epoch", 0, 20), ["limit"]);
    }

    #[test]
    fn test_colliding_file_keys_keep_separate_arenas() {
        let t = table(&[("A.epoch", "f : integer a { integer b = a }"), ("a.epoch", "g : nothing")]);
        let names: Vec<&str> = t
            .available_variables(Path::new("a.epoch"), 0, 20)
            .iter()
            .map(|v| v.name())
            .collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(t.file_count(), 2);
    }

    #[test]
    fn test_colliding_file_keys_resolve_each_arena() {
        let t = table(&[
            ("A.epoch", "f : integer a { integer b = a }"),
            ("a.epoch", "g : integer c {\n integer d = c\n}"),
        ]);
        let names = |line, col| -> Vec<String> {
            t.available_variables(Path::new("A.EPOCH"), line, col)
                .iter()
                .map(|v| v.name().to_string())
                .collect()
        };
        // Each arena answers only for positions its own scopes contain.
        assert_eq!(names(0, 20), ["a", "b", "c", "d"]);
        assert_eq!(names(1, 5), ["c", "d"]);
    }
}
