use geos::{Geom, PreparedGeometry};

use crate::error::EngineResult;

/// A GEOS geometry together with its prepared form.
///
/// `PreparedGeometry` borrows the geometry it was built from, so the pair is kept
/// in one owner. The prepared form is declared first and therefore dropped before
/// the geometry it points into. GEOS allocates both on the heap, so moving this
/// struct does not move what the prepared form references.
pub struct OwnedPreparedGeometry {
    prepared: PreparedGeometry<'static>,
    geometry: geos::Geometry,
}

impl OwnedPreparedGeometry {
    pub fn try_new(geometry: geos::Geometry) -> EngineResult<Self> {
        let prepared = geometry.to_prepared_geom()?;
        // SAFETY: the prepared geometry only ever lives inside `Self` next to the
        // geometry it was created from, is dropped first, and is only handed out
        // by reference tied to `&self`.
        let prepared: PreparedGeometry<'static> = unsafe {
            std::mem::transmute::<PreparedGeometry<'_>, PreparedGeometry<'static>>(prepared)
        };
        Ok(Self { prepared, geometry })
    }

    pub fn prepared(&self) -> &PreparedGeometry<'static> {
        &self.prepared
    }

    pub fn geometry(&self) -> &geos::Geometry {
        &self.geometry
    }
}

impl std::fmt::Debug for OwnedPreparedGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnedPreparedGeometry")
            .field("geometry_type", &self.geometry.geometry_type())
            .finish()
    }
}
