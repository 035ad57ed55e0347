pub type Vec3 = [f32; 3];

/// The 12 vertices of a regular icosahedron centred on the origin.
pub fn icosahedron_vertices(radius: f32) -> Vec<Vec3> {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let raw: [Vec3; 12] = [
        [-1.0, phi, 0.0],
        [1.0, phi, 0.0],
        [-1.0, -phi, 0.0],
        [1.0, -phi, 0.0],
        [0.0, -1.0, phi],
        [0.0, 1.0, phi],
        [0.0, -1.0, -phi],
        [0.0, 1.0, -phi],
        [phi, 0.0, -1.0],
        [phi, 0.0, 1.0],
        [-phi, 0.0, -1.0],
        [-phi, 0.0, 1.0],
    ];
    let scale = radius / (1.0 + phi * phi).sqrt();
    raw.iter()
        .map(|[x, y, z]| [x * scale, y * scale, z * scale])
        .collect()
}

/// Linear move from `original` toward the origin.
pub fn collapse_vertex(original: Vec3, blend: f32) -> Vec3 {
    let keep = 1.0 - blend.clamp(0.0, 1.0);
    [original[0] * keep, original[1] * keep, original[2] * keep]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length(v: Vec3) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn icosahedron_vertices_sit_on_the_sphere() {
        let vertices = icosahedron_vertices(2.0);
        assert_eq!(vertices.len(), 12);
        for v in vertices {
            assert!((length(v) - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn collapse_interpolates_to_origin() {
        let v = [2.0, -4.0, 1.0];
        assert_eq!(collapse_vertex(v, 0.0), v);
        assert_eq!(collapse_vertex(v, 1.0), [0.0, 0.0, 0.0]);
        assert_eq!(collapse_vertex(v, 0.5), [1.0, -2.0, 0.5]);
        assert_eq!(collapse_vertex(v, 3.0), [0.0, 0.0, 0.0]);
    }
}
