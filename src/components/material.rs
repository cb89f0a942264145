/// An electromagnetic medium, relative to vacuum.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    relative_permeability: f64,
    relative_permittivity: f64,
}

impl Material {
    #[inline]
    pub fn new(relative_permeability: f64, relative_permittivity: f64) -> Self {
        Self {
            relative_permeability,
            relative_permittivity,
        }
    }

    /// Free space, `mu_r = eps_r = 1`.
    #[inline]
    pub fn vacuum() -> Self {
        Self::new(1.0, 1.0)
    }

    /// An idealized perfect electric conductor.
    #[inline]
    pub fn perfect_conductor() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY)
    }

    #[inline]
    pub fn relative_permeability(&self) -> f64 {
        self.relative_permeability
    }

    #[inline]
    pub fn relative_permittivity(&self) -> f64 {
        self.relative_permittivity
    }

    /// Whether the solver treats this medium as a conductor, i.e. one of its
    /// constants is infinite and the matching field update vanishes.
    #[inline]
    pub fn is_perfect_conductor(&self) -> bool {
        self.relative_permeability.is_infinite() || self.relative_permittivity.is_infinite()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::vacuum()
    }
}

/// The ordered list of materials referenced by grid cells.
///
/// Entries can only be appended, so an index that was valid once stays valid.
/// Index 0 always exists and holds the base medium of the domain.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

#[allow(clippy::len_without_is_empty)]
impl MaterialTable {
    /// Creates a table holding only the base material.
    #[inline]
    pub fn new(base_material: Material) -> Self {
        Self {
            materials: vec![base_material],
        }
    }

    /// Builds a table from an ordered list. Returns `None` if the list is empty.
    pub fn from_vec(materials: Vec<Material>) -> Option<Self> {
        if materials.is_empty() {
            None
        } else {
            Some(Self { materials })
        }
    }

    /// Appends a material and returns its index.
    #[inline]
    pub fn push(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Material> {
        self.materials.get(index)
    }

    #[inline]
    pub fn base(&self) -> &Material {
        &self.materials[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[inline]
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.materials.len()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Material> {
        self.materials.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Material] {
        &self.materials
    }
}

impl<'a> IntoIterator for &'a MaterialTable {
    type Item = &'a Material;
    type IntoIter = std::slice::Iter<'a, Material>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
