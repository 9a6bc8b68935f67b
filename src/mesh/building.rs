//! Building geometry: a box body with windows, doors, a gable roof and gutters
//!
//! All details are thin boxes stuck onto the outside of the walls; the body itself is never cut.

use crate::mesh::{create_box, Mesh};

/// Dimensions of the facade details, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingStyle {
    pub window_width: f32,
    pub window_height: f32,
    pub window_spacing: f32,
    /// Minimum gap between the outermost window and the wall edge
    pub window_margin: f32,
    /// Windows starting below this height are left out
    pub window_min_z: f32,
    /// How far windows and doors stick out of the wall
    pub detail_depth: f32,
    pub door_width: f32,
    pub door_height: f32,
    pub gutter_size: f32,
    /// Gap between the wall and a gutter
    pub gutter_offset: f32,
}

impl Default for BuildingStyle {
    fn default() -> Self {
        Self {
            window_width: 1.0,
            window_height: 1.0,
            window_spacing: 3.0,
            window_margin: 1.0,
            window_min_z: 3.0,
            detail_depth: 0.15,
            door_width: 2.0,
            door_height: 3.0,
            gutter_size: 0.4,
            gutter_offset: 0.05,
        }
    }
}

/// Start positions of evenly spaced objects centered within `[start, end]`.
///
/// Places as many objects as fit with at least `min_margin` left on both ends.
pub fn symmetric_positions(start: f32, end: f32, size: f32, spacing: f32, min_margin: f32) -> Vec<f32> {
    let available = end - start;
    let usable = available - 2.0 * min_margin;
    if usable < size || spacing <= 0.0 {
        return Vec::new();
    }

    let mut count = ((usable + spacing) / spacing).floor() as usize;
    let mut margin = 0.0;
    while count > 0 {
        let span = (count - 1) as f32 * spacing + size;
        margin = (available - span) / 2.0;
        if margin >= min_margin {
            break;
        }
        count -= 1;
    }

    (0..count).map(|i| start + margin + i as f32 * spacing).collect()
}

/// Build one building over the footprint `min..max` with its walls `height` tall.
pub fn create_building(
    min: [f32; 2],
    max: [f32; 2],
    height: f32,
    roof_rise: f32,
    style: &BuildingStyle,
) -> Mesh {
    let (x0, x1) = (min[0].min(max[0]), min[0].max(max[0]));
    let (y0, y1) = (min[1].min(max[1]), min[1].max(max[1]));

    let mut mesh = create_box([x0, y0, 0.0], [x1, y1, height]);
    add_windows(&mut mesh, [x0, y0], [x1, y1], height, style);
    add_doors(&mut mesh, [x0, y0], [x1, y1], style);
    mesh.append(&create_roof([x0, y0], [x1, y1], height, roof_rise));
    add_gutters(&mut mesh, [x0, y0], [x1, y1], height, style);
    mesh
}

fn add_windows(mesh: &mut Mesh, min: [f32; 2], max: [f32; 2], height: f32, style: &BuildingStyle) {
    let [x0, y0] = min;
    let [x1, y1] = max;
    let d = style.detail_depth;
    let (w, h) = (style.window_width, style.window_height);

    let xs = symmetric_positions(x0, x1, w, style.window_spacing, style.window_margin);
    let ys = symmetric_positions(y0, y1, w, style.window_spacing, style.window_margin);
    let zs: Vec<f32> = symmetric_positions(0.0, height, h, style.window_spacing, style.window_margin)
        .into_iter()
        .filter(|&z| z >= style.window_min_z)
        .collect();

    for &z in &zs {
        for &x in &xs {
            mesh.append(&create_box([x, y0 - d, z], [x + w, y0, z + h]));
            mesh.append(&create_box([x, y1, z], [x + w, y1 + d, z + h]));
        }
        for &y in &ys {
            mesh.append(&create_box([x0 - d, y, z], [x0, y + w, z + h]));
            mesh.append(&create_box([x1, y, z], [x1 + d, y + w, z + h]));
        }
    }
}

fn add_doors(mesh: &mut Mesh, min: [f32; 2], max: [f32; 2], style: &BuildingStyle) {
    let [x0, y0] = min;
    let [x1, y1] = max;
    let d = style.detail_depth;
    let (w, h) = (style.door_width, style.door_height);
    let door_x = (x0 + x1 - w) / 2.0;
    let door_y = (y0 + y1 - w) / 2.0;

    mesh.append(&create_box([door_x, y0 - d, 0.0], [door_x + w, y0, h]));
    mesh.append(&create_box([door_x, y1, 0.0], [door_x + w, y1 + d, h]));
    mesh.append(&create_box([x0 - d, door_y, 0.0], [x0, door_y + w, h]));
    mesh.append(&create_box([x1, door_y, 0.0], [x1 + d, door_y + w, h]));
}

/// Closed gable roof; the ridge runs along y over the middle of the footprint.
fn create_roof(min: [f32; 2], max: [f32; 2], height: f32, rise: f32) -> Mesh {
    let [x0, y0] = min;
    let [x1, y1] = max;
    let xm = (x0 + x1) / 2.0;
    let top = height + rise;

    let vertices = vec![
        [x0, y0, height],
        [x1, y0, height],
        [x1, y1, height],
        [x0, y1, height],
        [xm, y0, top],
        [xm, y1, top],
    ];
    let faces = vec![
        [0, 1, 4], [2, 3, 5], // gable ends
        [0, 5, 3], [0, 4, 5], // x-min slope
        [1, 2, 5], [1, 5, 4], // x-max slope
        [0, 2, 1], [0, 3, 2], // underside
    ];
    Mesh::from_parts(vertices, faces)
}

fn add_gutters(mesh: &mut Mesh, min: [f32; 2], max: [f32; 2], height: f32, style: &BuildingStyle) {
    let [x0, y0] = min;
    let [x1, y1] = max;
    let s = style.gutter_size;
    let o = style.gutter_offset;

    // Downpipes at the four corners
    mesh.append(&create_box([x0 - o - s, y0 - o - s, 0.0], [x0 - o, y0 - o, height]));
    mesh.append(&create_box([x1 + o, y0 - o - s, 0.0], [x1 + o + s, y0 - o, height]));
    mesh.append(&create_box([x1 + o, y1 + o, 0.0], [x1 + o + s, y1 + o + s, height]));
    mesh.append(&create_box([x0 - o - s, y1 + o, 0.0], [x0 - o, y1 + o + s, height]));

    // Eaves gutters under both roof slopes
    let (z0, z1) = (height - s / 2.0, height + s / 2.0);
    mesh.append(&create_box([x0 - o - s, y0 - o, z0], [x0 - o, y1 + o, z1]));
    mesh.append(&create_box([x1 + o, y0 - o, z0], [x1 + o + s, y1 + o, z1]));
}
