//! Triangulated fault sources and their slip vectors.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurfaceError};

/// Slip on one triangle, split into its in-plane components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SlipVector {
    pub strike_slip: f64,
    pub dip_slip: f64,
    pub tensile: f64,
}

impl SlipVector {
    /// Decompose a slip magnitude and rake (degrees) into strike-slip and
    /// dip-slip. Tensile opening is always zero.
    pub fn from_slip_rake(slip: f64, rake_deg: f64) -> Self {
        let rake = rake_deg.to_radians();
        Self {
            strike_slip: slip * rake.cos(),
            dip_slip: slip * rake.sin(),
            tensile: 0.0,
        }
    }

    /// `[strike_slip, dip_slip, tensile]`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.strike_slip, self.dip_slip, self.tensile]
    }
}

/// A fault surface made of triangles with per-triangle slip and rake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultSource {
    vertices: Vec<[f64; 3]>,
    triangles: Vec<[usize; 3]>,
    slip: Vec<f64>,
    rake: Vec<f64>,
}

impl FaultSource {
    /// Build a fault source, checking that every triangle references an
    /// existing vertex and has one slip and one rake value.
    pub fn new(
        vertices: Vec<[f64; 3]>,
        triangles: Vec<[usize; 3]>,
        slip: Vec<f64>,
        rake: Vec<f64>,
    ) -> Result<Self> {
        if triangles.is_empty() {
            return Err(SurfaceError::invalid_fault("no triangles"));
        }
        if slip.len() != triangles.len() || rake.len() != triangles.len() {
            return Err(SurfaceError::invalid_fault(format!(
                "{} triangles but {} slip and {} rake values",
                triangles.len(),
                slip.len(),
                rake.len()
            )));
        }
        if let Some((i, tri)) = triangles
            .iter()
            .enumerate()
            .find(|(_, tri)| tri.iter().any(|&v| v >= vertices.len()))
        {
            return Err(SurfaceError::invalid_fault(format!(
                "triangle {} references vertex {:?} but only {} vertices exist",
                i,
                tri,
                vertices.len()
            )));
        }
        if vertices.iter().flatten().any(|c| !c.is_finite()) {
            return Err(SurfaceError::invalid_fault("non-finite vertex coordinate"));
        }
        if slip.iter().chain(rake.iter()).any(|v| !v.is_finite()) {
            return Err(SurfaceError::invalid_fault("non-finite slip or rake"));
        }

        Ok(Self {
            vertices,
            triangles,
            slip,
            rake,
        })
    }

    /// Same slip and rake on every triangle.
    pub fn uniform(
        vertices: Vec<[f64; 3]>,
        triangles: Vec<[usize; 3]>,
        slip: f64,
        rake: f64,
    ) -> Result<Self> {
        let n = triangles.len();
        Self::new(vertices, triangles, vec![slip; n], vec![rake; n])
    }

    pub fn vertices(&self) -> &[[f64; 3]] {
        &self.vertices
    }

    /// Vertex indices of each triangle.
    pub fn connectivity(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Corner coordinates of triangle `i`.
    pub fn triangle(&self, i: usize) -> Option<[[f64; 3]; 3]> {
        let [a, b, c] = *self.triangles.get(i)?;
        Some([self.vertices[a], self.vertices[b], self.vertices[c]])
    }

    /// Corner coordinates of every triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [[f64; 3]; 3]> + '_ {
        self.triangles
            .iter()
            .map(|&[a, b, c]| [self.vertices[a], self.vertices[b], self.vertices[c]])
    }

    /// Slip vector of every triangle.
    pub fn slip_vectors(&self) -> Vec<SlipVector> {
        self.slip
            .iter()
            .zip(&self.rake)
            .map(|(&slip, &rake)| SlipVector::from_slip_rake(slip, rake))
            .collect()
    }

    /// Number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}
