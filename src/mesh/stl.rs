//! STL export (binary and ASCII)

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::CityError;
use crate::mesh::{face_normal, Mesh};

/// STL flavour to write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

const BINARY_HEADER_LEN: usize = 80;
const SOLID_NAME: &str = "city";

/// Write a mesh as STL into any writer.
pub fn write_stl<W: Write>(mesh: &Mesh, writer: &mut W, format: StlFormat) -> io::Result<()> {
    match format {
        StlFormat::Binary => write_binary(mesh, writer),
        StlFormat::Ascii => write_ascii(mesh, writer),
    }
}

/// Write a mesh to an STL file. Any I/O failure is reported as `ExportFailure`.
pub fn export_stl<P: AsRef<Path>>(mesh: &Mesh, path: P, format: StlFormat) -> Result<(), CityError> {
    let path = path.as_ref();
    let to_error = |source: io::Error| CityError::ExportFailure {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write_stl(mesh, &mut writer, format).map_err(to_error)?;
    writer.flush().map_err(to_error)
}

fn write_binary<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    let mut header = [0u8; BINARY_HEADER_LEN];
    let label = b"city_generator binary STL";
    header[..label.len()].copy_from_slice(label);
    writer.write_all(&header)?;

    let count = u32::try_from(mesh.triangle_count())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many triangles for STL"))?;
    writer.write_all(&count.to_le_bytes())?;

    for tri in mesh.triangles() {
        let normal = face_normal(&tri);
        for value in normal.iter().chain(tri.iter().flatten()) {
            writer.write_all(&value.to_le_bytes())?;
        }
        // Attribute byte count
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

fn write_ascii<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "solid {}", SOLID_NAME)?;
    for tri in mesh.triangles() {
        let n = face_normal(&tri);
        writeln!(writer, "  facet normal {:e} {:e} {:e}", n[0], n[1], n[2])?;
        writeln!(writer, "    outer loop")?;
        for v in &tri {
            writeln!(writer, "      vertex {:e} {:e} {:e}", v[0], v[1], v[2])?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", SOLID_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::create_box;

    #[test]
    fn test_binary_layout() {
        let mesh = create_box([0.0; 3], [1.0; 3]);
        let mut bytes = Vec::new();
        write_stl(&mesh, &mut bytes, StlFormat::Binary).unwrap();
        assert_eq!(bytes.len(), 80 + 4 + 12 * 50);

        let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
        assert_eq!(count, 12);

        // First facet is the bottom face, normal -z
        let nz = f32::from_le_bytes([bytes[92], bytes[93], bytes[94], bytes[95]]);
        assert_eq!(nz, -1.0);
    }

    #[test]
    fn test_ascii_facets() {
        let mesh = create_box([0.0; 3], [2.0; 3]);
        let mut bytes = Vec::new();
        write_stl(&mesh, &mut bytes, StlFormat::Ascii).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("solid city\n"));
        assert!(text.trim_end().ends_with("endsolid city"));
        assert_eq!(text.matches("facet normal").count(), 12);
        assert_eq!(text.matches("vertex").count(), 36);
    }

    #[test]
    fn test_export_to_file() {
        let path = std::env::temp_dir().join("city_generator_stl_test.stl");
        let mesh = create_box([0.0; 3], [1.0; 3]);
        export_stl(&mesh, &path, StlFormat::Binary).unwrap();
        let len = std::fs::metadata(&path).unwrap().len();
        assert_eq!(len, 84 + 12 * 50);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join("city_generator_no_such_dir")
            .join("city.stl");
        let mesh = create_box([0.0; 3], [1.0; 3]);
        assert!(matches!(
            export_stl(&mesh, &path, StlFormat::Ascii),
            Err(CityError::ExportFailure { .. })
        ));
    }
}
