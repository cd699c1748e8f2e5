//! Drop-target computation for drag reordering

/// Vertical extent of a rendered field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldExtent {
    pub top: f64,
    pub height: f64,
}

impl FieldExtent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Index of the first field whose midpoint lies below `pointer_y`. Fields
/// without a known extent are skipped. `None` means the drop goes after
/// every field, which the caller resolves against its own field count.
pub fn insertion_index(extents: &[Option<FieldExtent>], pointer_y: f64) -> Option<usize> {
    extents
        .iter()
        .enumerate()
        .find_map(|(i, extent)| match extent {
            Some(e) if pointer_y < e.midpoint() => Some(i),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(n: usize) -> Vec<Option<FieldExtent>> {
        (0..n)
            .map(|i| Some(FieldExtent::new(i as f64 * 40.0, 40.0)))
            .collect()
    }

    #[test]
    fn test_insertion_index() {
        let extents = stack(3); // midpoints 20, 60, 100
        assert_eq!(insertion_index(&extents, 5.0), Some(0));
        assert_eq!(insertion_index(&extents, 20.0), Some(1));
        assert_eq!(insertion_index(&extents, 59.9), Some(1));
        assert_eq!(insertion_index(&extents, 100.0), None);
        assert_eq!(insertion_index(&[], 10.0), None);
    }

    #[test]
    fn test_unknown_extents_skipped() {
        let mut extents = stack(3);
        extents[0] = None;
        assert_eq!(insertion_index(&extents, 5.0), Some(1));
    }
}
