//! Typed geometry buffers handed to the renderer.
//!
//! Every attribute is an explicit array; there is no runtime probing of which
//! attributes a buffer carries. `merge` concatenates buffers and re-bases
//! indices, with the size invariants checked on both sides.

/// Per-vertex attribute arrays plus a triangle index list.
///
/// Invariant: `positions`, `normals`, `uvs` and `colors` have equal length,
/// `indices.len()` is a multiple of 3, and every index is in range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffer {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

/// Ways a buffer can violate its invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    AttributeLengthMismatch,
    IncompleteTriangle,
    IndexOutOfRange { index: u32, vertex_count: usize },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::AttributeLengthMismatch => {
                write!(f, "vertex attribute arrays have different lengths")
            }
            GeometryError::IncompleteTriangle => {
                write!(f, "index count is not a multiple of 3")
            }
            GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            } => write!(f, "index {index} out of range for {vertex_count} vertices"),
        }
    }
}

impl std::error::Error for GeometryError {}

impl GeometryBuffer {
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            colors: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append one vertex with all of its attributes.
    pub fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2], color: [f32; 3]) {
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        self.colors.push(color);
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        let n = self.positions.len();
        if self.normals.len() != n || self.uvs.len() != n || self.colors.len() != n {
            return Err(GeometryError::AttributeLengthMismatch);
        }
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle);
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count: n,
            });
        }
        Ok(())
    }

    /// Shift every position by `offset` (used to place template parts).
    pub fn translated(mut self, offset: [f32; 3]) -> Self {
        for p in &mut self.positions {
            p[0] += offset[0];
            p[1] += offset[1];
            p[2] += offset[2];
        }
        self
    }

    /// Fill every vertex colour with `color`.
    pub fn tinted(mut self, color: [f32; 3]) -> Self {
        self.colors.iter_mut().for_each(|c| *c = color);
        self
    }
}

/// Concatenate `parts` into one buffer, offsetting each part's indices by the
/// number of vertices that precede it.
///
/// Every part must be valid; the result then has exactly the summed vertex
/// and index counts and is itself valid.
pub fn merge(parts: &[GeometryBuffer]) -> Result<GeometryBuffer, GeometryError> {
    for part in parts {
        part.validate()?;
    }
    let vertex_total: usize = parts.iter().map(GeometryBuffer::vertex_count).sum();
    let index_total: usize = parts.iter().map(|p| p.indices.len()).sum();

    let mut out = GeometryBuffer::with_capacity(vertex_total, index_total);
    for part in parts {
        let base = out.vertex_count() as u32;
        out.positions.extend_from_slice(&part.positions);
        out.normals.extend_from_slice(&part.normals);
        out.uvs.extend_from_slice(&part.uvs);
        out.colors.extend_from_slice(&part.colors);
        out.indices.extend(part.indices.iter().map(|i| i + base));
    }

    debug_assert_eq!(out.vertex_count(), vertex_total);
    debug_assert_eq!(out.indices.len(), index_total);
    debug_assert!(out.validate().is_ok());
    Ok(out)
}

/// Axis-aligned box centred on the origin in x/z, resting on y = 0.
pub fn prism(width: f32, height: f32, depth: f32) -> GeometryBuffer {
    let (hx, hz) = (width * 0.5, depth * 0.5);
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([1.0, 0.0, 0.0], [[hx, 0.0, hz], [hx, 0.0, -hz], [hx, height, -hz], [hx, height, hz]]),
        ([-1.0, 0.0, 0.0], [[-hx, 0.0, -hz], [-hx, 0.0, hz], [-hx, height, hz], [-hx, height, -hz]]),
        ([0.0, 0.0, 1.0], [[-hx, 0.0, hz], [hx, 0.0, hz], [hx, height, hz], [-hx, height, hz]]),
        ([0.0, 0.0, -1.0], [[hx, 0.0, -hz], [-hx, 0.0, -hz], [-hx, height, -hz], [hx, height, -hz]]),
        ([0.0, 1.0, 0.0], [[-hx, height, hz], [hx, height, hz], [hx, height, -hz], [-hx, height, -hz]]),
        ([0.0, -1.0, 0.0], [[-hx, 0.0, -hz], [hx, 0.0, -hz], [hx, 0.0, hz], [-hx, 0.0, hz]]),
    ];
    let mut buf = GeometryBuffer::with_capacity(24, 36);
    for (normal, corners) in faces {
        let base = buf.vertex_count() as u32;
        for (corner, uv) in corners.iter().zip([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]) {
            buf.push_vertex(*corner, normal, uv, [1.0; 3]);
        }
        buf.push_triangle(base, base + 1, base + 2);
        buf.push_triangle(base, base + 2, base + 3);
    }
    buf
}

/// Four-sided pyramid with a square base of `width` resting on y = 0.
pub fn pyramid(width: f32, height: f32) -> GeometryBuffer {
    let h = width * 0.5;
    let apex = [0.0, height, 0.0];
    let base = [[-h, 0.0, h], [h, 0.0, h], [h, 0.0, -h], [-h, 0.0, -h]];
    let mut buf = GeometryBuffer::with_capacity(16, 18);
    for i in 0..4 {
        let a = base[i];
        let b = base[(i + 1) % 4];
        let normal = triangle_normal(a, b, apex);
        let start = buf.vertex_count() as u32;
        buf.push_vertex(a, normal, [0.0, 0.0], [1.0; 3]);
        buf.push_vertex(b, normal, [1.0, 0.0], [1.0; 3]);
        buf.push_vertex(apex, normal, [0.5, 1.0], [1.0; 3]);
        buf.push_triangle(start, start + 1, start + 2);
    }
    let start = buf.vertex_count() as u32;
    for (corner, uv) in base.iter().rev().zip([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]) {
        buf.push_vertex(*corner, [0.0, -1.0, 0.0], uv, [1.0; 3]);
    }
    buf.push_triangle(start, start + 1, start + 2);
    buf.push_triangle(start, start + 2, start + 3);
    buf
}

fn triangle_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let nx = u[1] * v[2] - u[2] * v[1];
    let ny = u[2] * v[0] - u[0] * v[2];
    let nz = u[0] * v[1] - u[1] * v[0];
    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    if len < 1e-8 {
        [0.0, 1.0, 0.0]
    } else {
        [nx / len, ny / len, nz / len]
    }
}
