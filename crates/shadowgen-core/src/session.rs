//! One generation run over a catalog of value classes.
//!
//! A session starts from the value classes that carry the marker annotation,
//! in catalog order, and follows every value class their properties
//! reference. Each value class is generated at most once per session. A
//! schema that fails is reported and skipped; its siblings are unaffected.

use crate::builder::ShadowClassBuilder;
use crate::config::GeneratorConfig;
use crate::error::{GenerationError, GenerationResult};
use crate::model::GeneratedUnit;
use crate::naming::NameResolver;
use crate::schema::{QualifiedName, ValueClass, applicable};
use crate::validate::validate;
use std::collections::{HashMap, HashSet, VecDeque};

/// A schema that could not be generated
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFailure {
    pub value_class: QualifiedName,
    pub error: GenerationError,
}

/// Outcome of [`GenerationSession::run`]
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    /// Generated units, in generation order
    pub units: Vec<GeneratedUnit>,
    pub failures: Vec<SchemaFailure>,
}

impl SessionReport {
    /// Whether every visited schema generated
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The unit generated for `value_class`, if any
    pub fn unit(&self, value_class: &QualifiedName) -> Option<&GeneratedUnit> {
        self.units.iter().find(|u| &u.value_class == value_class)
    }
}

/// Catalog of value classes known to one compilation run
#[derive(Debug)]
pub struct GenerationSession<'a> {
    config: &'a GeneratorConfig,
    catalog: Vec<ValueClass>,
}

impl<'a> GenerationSession<'a> {
    pub fn new(config: &'a GeneratorConfig, catalog: Vec<ValueClass>) -> Self {
        Self { config, catalog }
    }

    pub fn catalog(&self) -> &[ValueClass] {
        &self.catalog
    }

    /// Look up a value class by name
    pub fn find(&self, name: &QualifiedName) -> Option<&ValueClass> {
        self.catalog.iter().find(|v| &v.name == name)
    }

    /// Catalog entries that opt into generation
    pub fn eligible(&self) -> impl Iterator<Item = &ValueClass> {
        let marker = self.config.marker_annotation.0.as_str();
        self.catalog
            .iter()
            .filter(move |v| applicable(&v.annotations, marker))
    }

    /// Validate and build a single value class
    pub fn generate_one(&self, value: &ValueClass) -> GenerationResult<GeneratedUnit> {
        let schema = validate(&value.properties)?;
        let builder = ShadowClassBuilder::new(&self.config.naming);
        let model = builder.build(value, &schema)?;
        let wrapper = builder.wrapper(value)?;

        Ok(GeneratedUnit {
            value_class: value.name.clone(),
            references: schema
                .referenced_value_classes()
                .into_iter()
                .cloned()
                .collect(),
            wrapper,
            model,
        })
    }

    /// Generate every eligible value class and everything it references
    pub fn run(&self) -> SessionReport {
        let span = tracing::debug_span!("generation_session", catalog = self.catalog.len());
        let _guard = span.enter();

        let resolver = NameResolver::new(&self.config.naming);
        let mut queue: VecDeque<&ValueClass> = self.eligible().collect();
        let mut seen: HashSet<&QualifiedName> = HashSet::new();
        let mut missing: HashSet<QualifiedName> = HashSet::new();
        let mut claims: HashMap<QualifiedName, QualifiedName> = HashMap::new();
        let mut report = SessionReport::default();

        while let Some(value) = queue.pop_front() {
            if !seen.insert(&value.name) {
                continue;
            }

            let result = self
                .generate_one(value)
                .and_then(|unit| claim(&resolver, &mut claims, unit));

            match result {
                Ok(unit) => {
                    for reference in &unit.references {
                        match self.find(reference) {
                            Some(next) => queue.push_back(next),
                            None => {
                                if missing.insert(reference.clone()) {
                                    tracing::warn!(
                                        "Value class {} referenced by {} is not in the catalog; \
                                         its shadow class must come from another run",
                                        reference,
                                        value.name
                                    );
                                }
                            }
                        }
                    }
                    for reference in unit.cross_package_references() {
                        tracing::warn!(
                            "{} references {} from another package; \
                             its package-private shadow class is not accessible there",
                            value.name,
                            reference
                        );
                    }
                    tracing::debug!("Generated {}", unit.model.name);
                    report.units.push(unit);
                }
                Err(error) => {
                    tracing::debug!("Generation failed for {}: {}", value.name, error);
                    report.failures.push(SchemaFailure {
                        value_class: value.name.clone(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Validate and build every catalog entry, eligible or not.
    ///
    /// Entries share one set of generated name claims, so two value classes
    /// that flatten to the same generated class are reported like in [`Self::run`].
    pub fn check_all(&self) -> Vec<SchemaFailure> {
        let resolver = NameResolver::new(&self.config.naming);
        let mut claims: HashMap<QualifiedName, QualifiedName> = HashMap::new();

        self.catalog
            .iter()
            .filter_map(|value| {
                self.generate_one(value)
                    .and_then(|unit| claim(&resolver, &mut claims, unit))
                    .err()
                    .map(|error| SchemaFailure {
                        value_class: value.name.clone(),
                        error,
                    })
            })
            .collect()
    }
}

/// Record which value class owns the unit's final generated class
fn claim(
    resolver: &NameResolver<'_>,
    claims: &mut HashMap<QualifiedName, QualifiedName>,
    unit: GeneratedUnit,
) -> GenerationResult<GeneratedUnit> {
    let generated = resolver.canonicalize(&unit.wrapper.name);
    match claims.get(&generated) {
        Some(owner) if owner != &unit.value_class => Err(GenerationError::ambiguous(
            &generated,
            format!("also generated for `{owner}`"),
        )),
        _ => {
            claims.insert(generated, unit.value_class.clone());
            Ok(unit)
        }
    }
}
