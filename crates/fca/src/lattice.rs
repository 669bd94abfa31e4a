//! Concept lattices and their covering relation.
//!
//! Concepts live in an arena indexed by [`ConceptId`]; the Hasse diagram is
//! stored as adjacency sets of ids in both directions. Ids are dense and
//! assigned in a deterministic order (descending extent size, ascending
//! intent size, then display form), so rebuilding from the same concepts in
//! any input order yields the same ids.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;

use crate::concept::Concept;
use crate::error::LatticeError;

/// Dense identity of a concept within one lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptId(usize);

impl ConceptId {
    /// Position of the concept in identity order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatticeOptions {
    /// Fail when the top or bottom concept is absent instead of recording
    /// it as unknown.
    pub strict: bool,
}

/// A concept lattice over objects `O` and attributes `A`.
#[derive(Debug, Clone)]
pub struct ConceptLattice<O, A> {
    concepts: Vec<Concept<O, A>>,
    ids: HashMap<Concept<O, A>, ConceptId>,
    bounds: (Concept<O, A>, Concept<O, A>),
    top: Option<ConceptId>,
    bottom: Option<ConceptId>,
    top_down: BTreeMap<ConceptId, BTreeSet<ConceptId>>,
    bottom_up: BTreeMap<ConceptId, BTreeSet<ConceptId>>,
    // Children of the virtual root used when `top` is absent.
    roots: BTreeSet<ConceptId>,
    built_top_down: bool,
    built_bottom_up: bool,
}

impl<O, A> ConceptLattice<O, A>
where
    O: Ord + Hash + Clone + fmt::Display,
    A: Ord + Hash + Clone + fmt::Display,
{
    /// Creates a lattice whose top and bottom are derived from the concepts:
    /// top is `(∪ extents, ∩ intents)` and bottom is `(∩ extents, ∪ intents)`.
    ///
    /// If either derived bound is not among `concepts` its id is `None`.
    pub fn new(concepts: impl IntoIterator<Item = Concept<O, A>>) -> Self {
        let concepts: BTreeSet<Concept<O, A>> = concepts.into_iter().collect();
        let (top, bottom) = derive_bounds(&concepts);
        Self::init(concepts, top, bottom)
    }

    /// Creates a lattice with an explicit top and bottom.
    ///
    /// If either bound is not among `concepts` its id is `None`.
    pub fn with_bounds(
        concepts: impl IntoIterator<Item = Concept<O, A>>,
        top: &Concept<O, A>,
        bottom: &Concept<O, A>,
    ) -> Self {
        Self::init(concepts.into_iter().collect(), top.clone(), bottom.clone())
    }

    /// Creates a lattice with derived bounds under the given options.
    ///
    /// # Errors
    ///
    /// With `strict` set, returns [`LatticeError::MissingTop`] or
    /// [`LatticeError::MissingBottom`] when a derived bound is absent.
    pub fn with_options(
        concepts: impl IntoIterator<Item = Concept<O, A>>,
        options: LatticeOptions,
    ) -> Result<Self, LatticeError> {
        let lattice = Self::new(concepts);
        if options.strict {
            lattice.check_bounds()?;
        }
        Ok(lattice)
    }

    fn init(concepts: BTreeSet<Concept<O, A>>, top: Concept<O, A>, bottom: Concept<O, A>) -> Self {
        let mut ordered: Vec<Concept<O, A>> = concepts.into_iter().collect();
        ordered.sort_by_cached_key(|c| (Reverse(c.extent().len()), c.intent().len(), c.to_string()));

        let ids: HashMap<Concept<O, A>, ConceptId> = ordered
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), ConceptId(i)))
            .collect();

        let top_id = ids.get(&top).copied();
        let bottom_id = ids.get(&bottom).copied();
        if top_id.is_none() {
            tracing::warn!(top = %top, "top concept not among supplied concepts");
        }
        if bottom_id.is_none() {
            tracing::warn!(bottom = %bottom, "bottom concept not among supplied concepts");
        }

        Self {
            concepts: ordered,
            ids,
            bounds: (top, bottom),
            top: top_id,
            bottom: bottom_id,
            top_down: BTreeMap::new(),
            bottom_up: BTreeMap::new(),
            roots: BTreeSet::new(),
            built_top_down: false,
            built_bottom_up: false,
        }
    }

    /// Checks that both bounds are present.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::MissingTop`] or [`LatticeError::MissingBottom`].
    pub fn check_bounds(&self) -> Result<(), LatticeError> {
        if self.top.is_none() {
            return Err(LatticeError::MissingTop {
                top: self.bounds.0.to_string(),
                count: self.concepts.len(),
            });
        }
        if self.bottom.is_none() {
            return Err(LatticeError::MissingBottom {
                bottom: self.bounds.1.to_string(),
                count: self.concepts.len(),
            });
        }
        Ok(())
    }

    /// Builds the covering relation from top to bottom.
    ///
    /// Concepts are inserted in id order. Each insertion runs a
    /// breadth-first search from the top: at every candidate parent, a child
    /// lying below the new concept is rewired beneath it, a child lying above
    /// it becomes a further candidate, and if neither happens the new concept
    /// is attached directly under the candidate. Calling this again is a
    /// no-op.
    pub fn build_top_down(&mut self) {
        if self.built_top_down {
            return;
        }
        self.built_top_down = true;

        let mut queue: VecDeque<Option<ConceptId>> = VecDeque::new();
        let mut visited: HashSet<Option<ConceptId>> = HashSet::new();

        for index in 0..self.concepts.len() {
            let id = ConceptId(index);
            if Some(id) == self.top {
                continue;
            }

            queue.clear();
            visited.clear();
            queue.push_back(self.top);
            visited.insert(self.top);

            while let Some(parent) = queue.pop_front() {
                let children: Vec<ConceptId> = self.children_slot(parent).iter().copied().collect();
                let mut absorbed = false;

                for child in children {
                    if child == id {
                        continue;
                    }
                    if self.is_up_down(id, child) {
                        let slot = self.children_slot_mut(parent);
                        slot.remove(&child);
                        slot.insert(id);
                        self.top_down.entry(id).or_default().insert(child);
                        absorbed = true;
                    } else if self.is_down_up(id, child) {
                        if visited.insert(Some(child)) {
                            queue.push_back(Some(child));
                        }
                        absorbed = true;
                    }
                }

                if !absorbed {
                    self.children_slot_mut(parent).insert(id);
                }
            }
        }

        tracing::debug!(
            concepts = self.concepts.len(),
            edges = self.edge_count(),
            "built covering relation"
        );
    }

    /// Builds the upward covering relation by inverting the downward one,
    /// running [`Self::build_top_down`] first if needed. Idempotent.
    pub fn build_bottom_up(&mut self) {
        self.build_top_down();
        if self.built_bottom_up {
            return;
        }
        self.built_bottom_up = true;

        for (&parent, children) in &self.top_down {
            for &child in children {
                self.bottom_up.entry(child).or_default().insert(parent);
            }
        }
    }

    // `up` strictly above `down` by extent containment.
    fn is_up_down(&self, up: ConceptId, down: ConceptId) -> bool {
        up != down && self.concepts[up.0].covers_extent_of(&self.concepts[down.0])
    }

    // `down` strictly below `up` by intent containment.
    fn is_down_up(&self, down: ConceptId, up: ConceptId) -> bool {
        down != up && self.concepts[down.0].covers_intent_of(&self.concepts[up.0])
    }

    fn children_slot(&self, parent: Option<ConceptId>) -> &BTreeSet<ConceptId> {
        static EMPTY: BTreeSet<ConceptId> = BTreeSet::new();
        match parent {
            Some(p) => self.top_down.get(&p).unwrap_or(&EMPTY),
            None => &self.roots,
        }
    }

    fn children_slot_mut(&mut self, parent: Option<ConceptId>) -> &mut BTreeSet<ConceptId> {
        match parent {
            Some(p) => self.top_down.entry(p).or_default(),
            None => &mut self.roots,
        }
    }

    /// Number of distinct concepts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Whether the lattice has no concepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Id of the top concept, or `None` if it was not supplied.
    #[must_use]
    pub fn top_id(&self) -> Option<ConceptId> {
        self.top
    }

    /// Id of the bottom concept, or `None` if it was not supplied.
    #[must_use]
    pub fn bottom_id(&self) -> Option<ConceptId> {
        self.bottom
    }

    /// The concept with the given id.
    #[must_use]
    pub fn concept(&self, id: ConceptId) -> Option<&Concept<O, A>> {
        self.concepts.get(id.0)
    }

    /// The id of a concept, if it belongs to this lattice.
    #[must_use]
    pub fn id_of(&self, concept: &Concept<O, A>) -> Option<ConceptId> {
        self.ids.get(concept).copied()
    }

    /// All ids in identity order.
    pub fn ids(&self) -> impl Iterator<Item = ConceptId> {
        (0..self.concepts.len()).map(ConceptId)
    }

    /// All concepts with their ids, in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (ConceptId, &Concept<O, A>)> {
        self.concepts.iter().enumerate().map(|(i, c)| (ConceptId(i), c))
    }

    /// Whether [`Self::build_top_down`] has run.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.built_top_down
    }

    /// Direct subconcepts of `id`. Empty before [`Self::build_top_down`].
    pub fn children(&self, id: ConceptId) -> impl Iterator<Item = ConceptId> + '_ {
        self.top_down.get(&id).into_iter().flatten().copied()
    }

    /// Direct superconcepts of `id`. Empty before [`Self::build_bottom_up`].
    pub fn parents(&self, id: ConceptId) -> impl Iterator<Item = ConceptId> + '_ {
        self.bottom_up.get(&id).into_iter().flatten().copied()
    }

    /// Concepts with no superconcept: the top if present, otherwise the
    /// children of the virtual root.
    #[must_use]
    pub fn maximal_concepts(&self) -> Vec<ConceptId> {
        match self.top {
            Some(top) => vec![top],
            None => self.roots.iter().copied().collect(),
        }
    }

    /// All covering edges `(parent, child)`, excluding the virtual root.
    pub fn edges(&self) -> impl Iterator<Item = (ConceptId, ConceptId)> + '_ {
        self.top_down
            .iter()
            .flat_map(|(&p, children)| children.iter().map(move |&c| (p, c)))
    }

    /// Number of covering edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.top_down.values().map(BTreeSet::len).sum()
    }

    /// Objects whose object concept is `id`: the extent of `id` minus the
    /// extents of its direct subconcepts.
    #[must_use]
    pub fn introduced_objects(&self, id: ConceptId) -> BTreeSet<&O> {
        let Some(concept) = self.concept(id) else {
            return BTreeSet::new();
        };
        let mut objects: BTreeSet<&O> = concept.extent().iter().collect();
        for child in self.children(id) {
            for o in self.concepts[child.0].extent() {
                objects.remove(o);
            }
        }
        objects
    }

    /// The downward covering relation keyed by concept.
    #[must_use]
    pub fn sup_sub_concepts(&self) -> BTreeMap<&Concept<O, A>, BTreeSet<&Concept<O, A>>> {
        self.top_down
            .iter()
            .map(|(&p, children)| {
                let subs = children.iter().map(|c| &self.concepts[c.0]).collect();
                (&self.concepts[p.0], subs)
            })
            .collect()
    }

    /// Renders the lattice as an undirected Graphviz DOT graph.
    ///
    /// Nodes are labelled by the concept's display form with `\` and `"`
    /// escaped. An unbuilt or edgeless lattice renders as `graph { }`.
    #[must_use]
    pub fn to_dot(&self) -> String {
        if self.top_down.is_empty() {
            return "graph { }".to_owned();
        }

        let mut out = String::from("graph {\n");
        for (id, concept) in self.iter() {
            out.push_str(&format!(
                "  {id} [label = \"{}\"];\n",
                escape_label(&concept.to_string())
            ));
        }
        for (parent, children) in &self.top_down {
            if children.is_empty() {
                continue;
            }
            let list: Vec<String> = children.iter().map(ToString::to_string).collect();
            out.push_str(&format!("  {parent} -- {{ {} }};\n", list.join(", ")));
        }
        out.push('}');
        out
    }
}

fn derive_bounds<O, A>(concepts: &BTreeSet<Concept<O, A>>) -> (Concept<O, A>, Concept<O, A>)
where
    O: Ord + Clone,
    A: Ord + Clone,
{
    let all_objects: BTreeSet<O> = concepts.iter().flat_map(|c| c.extent().iter().cloned()).collect();
    let all_attributes: BTreeSet<A> = concepts.iter().flat_map(|c| c.intent().iter().cloned()).collect();

    let mut top_intent = all_attributes.clone();
    let mut bottom_extent = all_objects.clone();
    for c in concepts {
        top_intent.retain(|a| c.intent().contains(a));
        bottom_extent.retain(|o| c.extent().contains(o));
    }

    (
        Concept::new(all_objects, top_intent),
        Concept::new(bottom_extent, all_attributes),
    )
}

fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for ch in label.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn textbook() -> Vec<Concept<u8, char>> {
        vec![
            Concept::new([1, 2, 3, 4], []),
            Concept::new([1, 2], ['a']),
            Concept::new([3, 4], ['b']),
            Concept::new([1], ['a', 'c']),
            Concept::new([], ['a', 'b', 'c']),
        ]
    }

    fn edge_set(lattice: &ConceptLattice<u8, char>) -> BTreeSet<(String, String)> {
        lattice
            .edges()
            .map(|(p, c)| {
                (
                    lattice.concept(p).unwrap().to_string(),
                    lattice.concept(c).unwrap().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn identity_order_is_generality_then_intent_then_label() {
        let lattice = ConceptLattice::new(textbook());
        let labels: Vec<String> = lattice.iter().map(|(_, c)| c.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "{1, 2, 3, 4} | {}",
                "{1, 2} | {a}",
                "{3, 4} | {b}",
                "{1} | {a, c}",
                "{} | {a, b, c}",
            ]
        );
    }

    #[test]
    fn textbook_lattice_has_five_covering_edges() {
        let mut lattice = ConceptLattice::new(textbook());
        lattice.build_top_down();

        assert_eq!(lattice.len(), 5);
        let top = lattice.top_id().unwrap();
        let bottom = lattice.bottom_id().unwrap();
        assert_eq!(lattice.concept(top).unwrap().extent().len(), 4);
        assert_eq!(lattice.concept(bottom).unwrap().intent().len(), 3);
        assert_eq!(lattice.edge_count(), 5);
        assert!(!lattice.children(top).any(|c| c == bottom));

        let expected: BTreeSet<(String, String)> = [
            ("{1, 2, 3, 4} | {}", "{1, 2} | {a}"),
            ("{1, 2, 3, 4} | {}", "{3, 4} | {b}"),
            ("{1, 2} | {a}", "{1} | {a, c}"),
            ("{1} | {a, c}", "{} | {a, b, c}"),
            ("{3, 4} | {b}", "{} | {a, b, c}"),
        ]
        .iter()
        .map(|(p, c)| ((*p).to_owned(), (*c).to_owned()))
        .collect();
        assert_eq!(edge_set(&lattice), expected);
    }

    #[test]
    fn bottom_up_inverts_top_down_and_is_idempotent() {
        let mut lattice = ConceptLattice::new(textbook());
        lattice.build_bottom_up();
        lattice.build_bottom_up();

        let down: BTreeSet<(ConceptId, ConceptId)> = lattice.edges().collect();
        let mut up: BTreeSet<(ConceptId, ConceptId)> = BTreeSet::new();
        for id in lattice.ids() {
            for parent in lattice.parents(id) {
                up.insert((parent, id));
            }
        }
        assert_eq!(down, up);
        assert_eq!(lattice.edge_count(), 5);

        let mut explicit = ConceptLattice::new(textbook());
        explicit.build_top_down();
        explicit.build_top_down();
        explicit.build_bottom_up();
        assert_eq!(explicit.edges().collect::<BTreeSet<_>>(), down);
    }

    #[test]
    fn duplicates_collapse() {
        let mut concepts = textbook();
        concepts.push(Concept::new([2, 1], ['a']));
        let lattice = ConceptLattice::new(concepts);
        assert_eq!(lattice.len(), 5);
    }

    #[test]
    fn missing_bounds_are_unknown_not_fatal() {
        let concepts = vec![
            Concept::new([1, 2], ['a']),
            Concept::new([3, 4], ['b']),
            Concept::new([1], ['a', 'c']),
        ];
        let mut lattice = ConceptLattice::new(concepts.clone());
        assert_eq!(lattice.top_id(), None);
        assert_eq!(lattice.bottom_id(), None);

        lattice.build_bottom_up();
        let roots: Vec<String> = lattice
            .maximal_concepts()
            .into_iter()
            .map(|id| lattice.concept(id).unwrap().to_string())
            .collect();
        assert_eq!(roots, vec!["{1, 2} | {a}", "{3, 4} | {b}"]);
        assert_eq!(lattice.edge_count(), 1);

        let err = ConceptLattice::with_options(concepts, LatticeOptions { strict: true }).unwrap_err();
        assert!(matches!(err, LatticeError::MissingTop { count: 3, .. }));
    }

    #[test]
    fn explicit_bounds() {
        let top = Concept::new([1, 2, 3, 4], []);
        let bottom = Concept::new([], ['a', 'b', 'c']);
        let lattice = ConceptLattice::with_bounds(textbook(), &top, &bottom);
        assert_eq!(lattice.top_id(), lattice.id_of(&top));
        assert_eq!(lattice.bottom_id(), lattice.id_of(&bottom));
        assert!(lattice.check_bounds().is_ok());

        let strict = ConceptLattice::with_options(textbook(), LatticeOptions { strict: true });
        assert!(strict.is_ok());
    }

    #[test]
    fn introduced_objects_are_object_concepts() {
        let mut lattice = ConceptLattice::new(textbook());
        lattice.build_top_down();
        let id = |ext: &[u8], int: &[char]| {
            lattice
                .id_of(&Concept::new(ext.iter().copied(), int.iter().copied()))
                .unwrap()
        };
        assert_eq!(lattice.introduced_objects(id(&[1, 2], &['a'])), [&2].into_iter().collect());
        assert_eq!(lattice.introduced_objects(id(&[3, 4], &['b'])), [&3, &4].into_iter().collect());
        assert!(lattice.introduced_objects(id(&[1, 2, 3, 4], &[])).is_empty());
    }

    #[test]
    fn sup_sub_concepts_mirror_edges() {
        let mut lattice = ConceptLattice::new(textbook());
        lattice.build_top_down();
        let map = lattice.sup_sub_concepts();
        let top = Concept::new([1, 2, 3, 4], []);
        assert_eq!(map.get(&top).map(BTreeSet::len), Some(2));
        assert_eq!(map.values().map(BTreeSet::len).sum::<usize>(), 5);
    }

    #[test]
    fn dot_export() {
        let mut lattice = ConceptLattice::new(textbook());
        assert_eq!(lattice.to_dot(), "graph { }");
        lattice.build_top_down();
        let dot = lattice.to_dot();
        assert!(dot.starts_with("graph {\n"));
        assert!(dot.contains("  0 [label = \"{1, 2, 3, 4} | {}\"];\n"));
        assert!(dot.contains("  0 -- { 1, 2 };\n"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn dot_labels_are_escaped() {
        let mut lattice: ConceptLattice<String, String> = ConceptLattice::new(vec![
            Concept::new(["say \"hi\"".to_owned()], []),
            Concept::new([], ["a\\b".to_owned()]),
        ]);
        lattice.build_top_down();
        let dot = lattice.to_dot();
        assert!(dot.contains(r#"{say \"hi\"}"#));
        assert!(dot.contains(r"{a\\b}"));
    }
}
