//! Triangle mesh construction for the 3D city export
//!
//! Geometry is kept as a plain indexed triangle soup. Parts are built independently and merged
//! with [`Mesh::append`]; no boolean operations are performed.

pub mod assemble;
pub mod building;
pub mod stl;
pub mod street;

pub use assemble::{assemble_city_mesh, CELL_SCALE};
pub use building::{create_building, symmetric_positions, BuildingStyle};
pub use stl::{export_stl, write_stl, StlFormat};
pub use street::{create_street, STREET_HEIGHT};

/// An indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<[f32; 3]>,
    pub faces: Vec<[u32; 3]>,
}

/// Axis-aligned bounding box of a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Box triangles over the 8 corners produced by [`create_box`].
const BOX_FACES: [[u32; 3]; 12] = [
    [0, 2, 1], [0, 3, 2], // bottom
    [4, 5, 6], [4, 6, 7], // top
    [0, 1, 5], [0, 5, 4], // front
    [1, 2, 6], [1, 6, 5], // right
    [2, 3, 7], [2, 7, 6], // back
    [3, 0, 4], [3, 4, 7], // left
];

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(vertices: Vec<[f32; 3]>, faces: Vec<[u32; 3]>) -> Self {
        debug_assert!(faces.iter().flatten().all(|&i| (i as usize) < vertices.len()));
        Self { vertices, faces }
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Merge another mesh into this one, re-indexing its faces.
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
        );
    }

    /// Concatenate many meshes into one.
    pub fn concatenate<'a>(meshes: impl IntoIterator<Item = &'a Mesh>) -> Mesh {
        let mut combined = Mesh::new();
        for mesh in meshes {
            combined.append(mesh);
        }
        combined
    }

    /// Corner positions of each triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.faces.iter().map(move |f| {
            [
                self.vertices[f[0] as usize],
                self.vertices[f[1] as usize],
                self.vertices[f[2] as usize],
            ]
        })
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.vertices.first()?;
        let mut bounds = Bounds { min: first, max: first };
        for v in &self.vertices {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(v[axis]);
                bounds.max[axis] = bounds.max[axis].max(v[axis]);
            }
        }
        Some(bounds)
    }
}

/// Unit normal of a triangle (zero for degenerate triangles), counter-clockwise winding.
pub fn face_normal(tri: &[[f32; 3]; 3]) -> [f32; 3] {
    let u = sub(tri[1], tri[0]);
    let v = sub(tri[2], tri[0]);
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    if len > f32::EPSILON {
        [n[0] / len, n[1] / len, n[2] / len]
    } else {
        [0.0, 0.0, 0.0]
    }
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Closed box spanning two opposite corners, in any order.
pub fn create_box(a: [f32; 3], b: [f32; 3]) -> Mesh {
    let (x0, x1) = (a[0].min(b[0]), a[0].max(b[0]));
    let (y0, y1) = (a[1].min(b[1]), a[1].max(b[1]));
    let (z0, z1) = (a[2].min(b[2]), a[2].max(b[2]));

    let vertices = vec![
        [x0, y0, z0], [x1, y0, z0], [x1, y1, z0], [x0, y1, z0],
        [x0, y0, z1], [x1, y0, z1], [x1, y1, z1], [x0, y1, z1],
    ];

    Mesh::from_parts(vertices, BOX_FACES.to_vec())
}

/// Ground slab of `width × depth` whose top face sits at z = 0.
pub fn create_plane(width: f32, depth: f32, thickness: f32) -> Mesh {
    create_box([0.0, 0.0, -thickness], [width, depth, 0.0])
}
