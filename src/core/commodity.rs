//! Commodity identities and the registry that hands them out

use std::collections::HashMap;
use std::fmt::Display;

/// Opaque handle for a commodity. Only meaningful together with the
/// [`CommodityRegistry`] that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct CommodityId(u32);

impl CommodityId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl Display for CommodityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interns commodity symbols into small integer handles.
#[derive(Debug, Default, Clone)]
pub struct CommodityRegistry {
    symbols: Vec<String>,
    ids: HashMap<String, CommodityId>,
}

impl CommodityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `symbol`, allocating one on first sight.
    pub fn intern(&mut self, symbol: &str) -> CommodityId {
        let symbol = symbol.trim();
        if let Some(id) = self.ids.get(symbol) {
            return *id;
        }
        let id = CommodityId(self.symbols.len() as u32);
        self.symbols.push(symbol.to_string());
        self.ids.insert(symbol.to_string(), id);
        id
    }

    pub fn get(&self, symbol: &str) -> Option<CommodityId> {
        self.ids.get(symbol.trim()).copied()
    }

    pub fn symbol(&self, id: CommodityId) -> Option<&str> {
        self.symbols.get(id.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over all commodities in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (CommodityId, &str)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (CommodityId(i as u32), s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut registry = CommodityRegistry::new();
        let usd = registry.intern("USD");
        let eur = registry.intern("EUR");

        assert_ne!(usd, eur);
        assert_eq!(registry.intern("USD"), usd);
        assert_eq!(registry.intern("  USD "), usd);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_by_symbol_and_id() {
        let mut registry = CommodityRegistry::new();
        let chf = registry.intern("CHF");

        assert_eq!(registry.get("CHF"), Some(chf));
        assert_eq!(registry.get("JPY"), None);
        assert_eq!(registry.symbol(chf), Some("CHF"));
        assert_eq!(chf.to_string(), "#0");
    }

    #[test]
    fn test_iter_in_allocation_order() {
        let mut registry = CommodityRegistry::new();
        registry.intern("B");
        registry.intern("A");

        let symbols: Vec<&str> = registry.iter().map(|(_, s)| s).collect();
        assert_eq!(symbols, vec!["B", "A"]);
        assert!(!registry.is_empty());
    }
}
