//! The optional substyle API (spec.md §4.9, §3 "Substyle"): numeric styles
//! allocated above a lexer's fixed set, for user-defined identifier
//! categories that fall back to a primary style for rendering.
//!
//! Not every lexer needs this -- neither `lexi-cpp` nor `lexi-lua`
//! allocates substyles for the representative behaviour spec.md asks them
//! to demonstrate -- so it lives as a standalone, independently testable
//! allocator a lexer can embed if its keyword model calls for it, mirroring
//! how the framework's other optional pieces (e.g. escape-sequence styling)
//! are opt-in per lexer rather than forced on every implementation.

use ahash::AHashMap;

/// One contiguous run of substyles allocated for a single primary style.
#[derive(Debug, Clone)]
struct Allocation {
    primary_style: u8,
    first_substyle: u8,
    count: u8,
    /// Per-substyle bound identifiers (`SetIdentifiers`), keyed by the
    /// substyle id within this allocation.
    identifiers: AHashMap<u8, Vec<String>>,
}

/// Allocates and resolves substyle ids above a lexer's base style range.
///
/// Mirrors the shape of the allocate/free/start/length/identifier-binding
/// operations spec.md §4.9 lists for the lexer instance contract: a lexer
/// calls [`SubstyleAllocator::allocate`] once per primary style that wants
/// substyles, binds identifier names to specific substyle ids with
/// [`SubstyleAllocator::set_identifiers`], and later resolves a style byte
/// back to its primary style with [`SubstyleAllocator::primary_style_of`]
/// for anything (rendering, further classification) that only understands
/// the fixed set.
#[derive(Debug, Default)]
pub struct SubstyleAllocator {
    base: u8,
    allocations: Vec<Allocation>,
}

impl SubstyleAllocator {
    /// `base` is the first numeric style value above the lexer's fixed set
    /// that substyles may be allocated from.
    pub fn new(base: u8) -> Self {
        Self { base, allocations: Vec::new() }
    }

    /// Allocates `count` fresh substyle ids for `primary_style`, returning
    /// the first id, or `None` if the allocation would overflow `u8`.
    pub fn allocate(&mut self, primary_style: u8, count: u8) -> Option<u8> {
        if count == 0 {
            return None;
        }
        let next = self.allocations.iter().map(|a| a.first_substyle as u16 + a.count as u16).max().unwrap_or(self.base as u16);
        let first = u8::try_from(next).ok()?;
        if next + count as u16 > 255 {
            return None;
        }
        self.allocations.push(Allocation { primary_style, first_substyle: first, count, identifiers: AHashMap::new() });
        Some(first)
    }

    /// Releases every allocation, returning substyle ids to the pool.
    pub fn free(&mut self) {
        self.allocations.clear();
    }

    fn allocation_for(&self, substyle: u8) -> Option<&Allocation> {
        self.allocations.iter().find(|a| substyle >= a.first_substyle && substyle < a.first_substyle + a.count)
    }

    /// First substyle id allocated for `primary_style`, if any.
    pub fn substyles_start(&self, primary_style: u8) -> Option<u8> {
        self.allocations.iter().find(|a| a.primary_style == primary_style).map(|a| a.first_substyle)
    }

    /// Count of substyle ids allocated for `primary_style`.
    pub fn substyles_length(&self, primary_style: u8) -> u8 {
        self.allocations.iter().filter(|a| a.primary_style == primary_style).map(|a| a.count).sum()
    }

    /// The primary style a substyle id resolves back to for rendering
    /// fallback, or `style` itself if it isn't a known substyle.
    pub fn primary_style_of(&self, style: u8) -> u8 {
        self.allocation_for(style).map(|a| a.primary_style).unwrap_or(style)
    }

    /// Binds a whitespace-separated identifier blob to `substyle`. Returns
    /// `false` if `substyle` wasn't allocated by this allocator.
    pub fn set_identifiers(&mut self, substyle: u8, blob: &str) -> bool {
        let Some(alloc) = self.allocations.iter_mut().find(|a| substyle >= a.first_substyle && substyle < a.first_substyle + a.count) else {
            return false;
        };
        alloc.identifiers.insert(substyle, blob.split_whitespace().map(str::to_string).collect());
        true
    }

    /// The substyle id an identifier was bound to under `primary_style`, if
    /// any -- used by a lexer's identifier classification step after it has
    /// already matched the fixed keyword lists and found nothing.
    pub fn substyle_for_identifier(&self, primary_style: u8, identifier: &str) -> Option<u8> {
        self.allocations
            .iter()
            .filter(|a| a.primary_style == primary_style)
            .find_map(|a| a.identifiers.iter().find(|(_, words)| words.iter().any(|w| w == identifier)).map(|(&id, _)| id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_returns_contiguous_ids_above_base() {
        let mut alloc = SubstyleAllocator::new(64);
        let first = alloc.allocate(11, 3).unwrap();
        assert_eq!(first, 64);
        assert_eq!(alloc.substyles_length(11), 3);
        let second = alloc.allocate(5, 2).unwrap();
        assert_eq!(second, 67);
    }

    #[test]
    fn primary_style_of_resolves_substyles_and_passes_through_others() {
        let mut alloc = SubstyleAllocator::new(64);
        let first = alloc.allocate(11, 2).unwrap();
        assert_eq!(alloc.primary_style_of(first), 11);
        assert_eq!(alloc.primary_style_of(first + 1), 11);
        assert_eq!(alloc.primary_style_of(5), 5); // not a substyle, passed through
    }

    #[test]
    fn set_identifiers_binds_words_to_a_specific_substyle() {
        let mut alloc = SubstyleAllocator::new(64);
        let first = alloc.allocate(11, 2).unwrap();
        assert!(alloc.set_identifiers(first, "MyClass OtherClass"));
        assert!(alloc.set_identifiers(first + 1, "MyEnum"));
        assert_eq!(alloc.substyle_for_identifier(11, "OtherClass"), Some(first));
        assert_eq!(alloc.substyle_for_identifier(11, "MyEnum"), Some(first + 1));
        assert_eq!(alloc.substyle_for_identifier(11, "Unknown"), None);
    }

    #[test]
    fn set_identifiers_on_unallocated_substyle_fails() {
        let mut alloc = SubstyleAllocator::new(64);
        assert!(!alloc.set_identifiers(200, "x"));
    }

    #[test]
    fn free_releases_all_allocations() {
        let mut alloc = SubstyleAllocator::new(64);
        alloc.allocate(11, 2).unwrap();
        alloc.free();
        assert_eq!(alloc.substyles_length(11), 0);
        assert_eq!(alloc.allocate(11, 2), Some(64)); // pool reset to base
    }
}
