use arbitrary::{Arbitrary, Unstructured};

#[derive(Debug, Clone, Copy, Arbitrary)]
pub struct Vertex {
    /// Index into [`Mesh::positions`], reduced modulo its length.
    pub position: u8,
    pub normal: [f32; 3],
}

/// A mesh with a small pool of positions, so that many vertices share one.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
}

impl<'a> Arbitrary<'a> for Mesh {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self, arbitrary::Error> {
        let pool = Vec::<[f32; 3]>::arbitrary(u)?;
        let vertices = Vec::<Vertex>::arbitrary(u)?;

        // Known failure: no positions to share
        if pool.is_empty() {
            return Err(arbitrary::Error::IncorrectFormat);
        }

        let (positions, normals) = vertices
            .iter()
            .map(|v| (pool[v.position as usize % pool.len()], v.normal))
            .unzip();

        let mesh = Self { positions, normals };
        mesh.validate()?;
        Ok(mesh)
    }
}

impl Mesh {
    pub fn validate(&self) -> Result<(), arbitrary::Error> {
        // Known failure: non-finite values
        if self
            .positions
            .iter()
            .chain(&self.normals)
            .flatten()
            .any(|v| !v.is_finite())
        {
            return Err(arbitrary::Error::IncorrectFormat);
        }

        // Known failure: normals large enough to overflow when summed
        if self.normals.iter().flatten().any(|v| v.abs() > 1e6) {
            return Err(arbitrary::Error::IncorrectFormat);
        }

        Ok(())
    }

    /// Panics if `smoothed` breaks an invariant of the smoothing pass.
    pub fn assert_valid(&self, smoothed: &[[f32; 3]], remapped: bool) {
        assert_eq!(self.positions.len(), smoothed.len());

        for value in smoothed {
            assert!(value.iter().all(|c| c.is_finite()), "{value:?}");

            let direction = if remapped {
                assert!(value.iter().all(|c| (-1e-4..=1. + 1e-4).contains(c)), "{value:?}");
                bevy_smooth_normals::decode_unit_range(*value)
            } else {
                *value
            };

            let length_squared = direction.iter().map(|c| c * c).sum::<f32>();
            assert!(
                length_squared == 0. || (length_squared - 1.).abs() < 1e-3,
                "{value:?} is neither zero nor unit length"
            );
        }
    }
}
