use crate::entity::CountryId;
use crate::geometry::{OutlineGeometry, PickSurface};
use crate::registry::CountryRecord;
use crate::style::{Appearance, Highlight, Palette};

/// Rotation shared by every object in the globe scene (ocean, outlines, pick surfaces).
///
/// Applied Y first, then X.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SceneRotation {
    pub x: f64,
    pub y: f64,
}

impl SceneRotation {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Everything needed to add one country to a [`World`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewCountry {
    pub numeric_code: Option<u32>,
    pub iso3: Option<String>,
    pub display_name: String,
    pub record: Option<CountryRecord>,
    pub outline: OutlineGeometry,
    pub pick: PickSurface,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneCountry {
    pub id: CountryId,
    pub numeric_code: Option<u32>,
    pub iso3: Option<String>,
    pub display_name: String,
    pub record: Option<CountryRecord>,
    pub outline: OutlineGeometry,
    pub pick: PickSurface,
    highlight: Highlight,
}

impl SceneCountry {
    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    /// Only countries matched to a registry record can be navigated to.
    pub fn is_navigable(&self) -> bool {
        self.record.is_some()
    }

    pub fn iso2(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.iso2.as_str())
    }
}

/// The globe scene: one entry per country with usable boundary rings.
///
/// Geometry is immutable once spawned; only highlights and the shared
/// rotation change at runtime.
#[derive(Debug, Default)]
pub struct World {
    countries: Vec<SceneCountry>,
    rotation: SceneRotation,
    palette: Palette,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }

    pub fn spawn_country(&mut self, country: NewCountry) -> CountryId {
        let id = CountryId(self.countries.len() as u32);
        self.countries.push(SceneCountry {
            id,
            numeric_code: country.numeric_code,
            iso3: country.iso3,
            display_name: country.display_name,
            record: country.record,
            outline: country.outline,
            pick: country.pick,
            highlight: Highlight::None,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn countries(&self) -> &[SceneCountry] {
        &self.countries
    }

    pub fn country(&self, id: CountryId) -> Option<&SceneCountry> {
        self.countries.get(id.index() as usize)
    }

    pub fn find_by_iso2(&self, iso2: &str) -> Option<CountryId> {
        self.countries
            .iter()
            .find(|c| c.iso2().is_some_and(|code| code.eq_ignore_ascii_case(iso2)))
            .map(|c| c.id)
    }

    /// Returns `true` if the highlight changed.
    pub fn set_highlight(&mut self, id: CountryId, highlight: Highlight) -> bool {
        let Some(country) = self.countries.get_mut(id.index() as usize) else {
            return false;
        };
        if country.highlight == highlight {
            return false;
        }
        country.highlight = highlight;
        true
    }

    pub fn appearance(&self, id: CountryId) -> Option<Appearance> {
        self.country(id)
            .map(|c| self.palette.appearance(c.highlight))
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn rotation(&self) -> SceneRotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: SceneRotation) {
        self.rotation = rotation;
    }
}
