use crate::Pt3D;

/// An indexed triangle mesh, ready for uploading to a renderer. Groups of three indices make up
/// the triangles; every vertex has one UV.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Pt3D>,
    pub uvs: Vec<[f64; 2]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Mesh {
        Mesh::default()
    }

    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Adds a vertex, returning its index.
    pub fn push_vertex(&mut self, pos: Pt3D, uv: [f64; 2]) -> u32 {
        let idx = u32::try_from(self.positions.len())
            .unwrap_or_else(|_| panic!("{} vertices can't be indexed with u32", self.positions.len()));
        self.positions.push(pos);
        self.uvs.push(uv);
        idx
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend([a, b, c]);
    }

    /// Merges another mesh into this one, shifting its indices.
    pub fn append(&mut self, other: Mesh) {
        let base = self.positions.len() as u32;
        self.positions.extend(other.positions);
        self.uvs.extend(other.uvs);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Pt3D; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// The unnormalized normal of every triangle, following the winding order.
    pub fn face_normals(&self) -> Vec<Pt3D> {
        self.triangles()
            .map(|[a, b, c]| (b - a).cross(c - a))
            .collect()
    }
}
