use at_core::frame::TileGrid;

/// Mémorise la dernière grille de luminosité par tuile.
///
/// Only a change of tiling resolution makes the grid stale; character-set
/// edits never do, since a tile's brightness does not depend on which
/// characters exist. `invalidate` keeps the stale grid allocated but it is
/// never handed out again until the next `store`.
///
/// # Example
/// ```
/// use at_ascii::tile_cache::TileBrightnessCache;
/// use at_core::frame::TileGrid;
///
/// let mut cache = TileBrightnessCache::new();
/// assert!(cache.get().is_none());
/// cache.store(TileGrid::from_values(vec![0.5; 4], 2, 2));
/// assert!(cache.get().is_some());
/// cache.invalidate();
/// assert!(cache.get().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TileBrightnessCache {
    grid: Option<TileGrid>,
    valid: bool,
}

impl TileBrightnessCache {
    /// Empty, invalid cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached grid, only while valid.
    #[must_use]
    pub fn get(&self) -> Option<&TileGrid> {
        if self.valid { self.grid.as_ref() } else { None }
    }

    /// Replace the cached grid, mark it valid and return it.
    pub fn store(&mut self, grid: TileGrid) -> &TileGrid {
        self.valid = true;
        self.grid.insert(grid)
    }

    /// The cached grid if valid, otherwise the result of `compute`, which is
    /// stored through [`TileBrightnessCache::store`].
    pub fn get_or_refresh(&mut self, compute: impl FnOnce() -> TileGrid) -> &TileGrid {
        if !self.is_valid() {
            return self.store(compute());
        }
        self.grid.get_or_insert_with(compute)
    }

    /// Mark the cached grid stale without dropping it.
    pub fn invalidate(&mut self) {
        if self.valid {
            log::debug!("Cache de luminosité invalidé");
        }
        self.valid = false;
    }

    /// True if `get` would return a grid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid && self.grid.is_some()
    }
}
