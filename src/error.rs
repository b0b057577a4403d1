use quick_error::quick_error;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum GgsegError {
        /// The requested data column is neither a built-in attribute nor a declared column of the atlas table.
        MissingColumn(column: String) {
            display("No such column in atlas table: '{}'", column)
        }

        /// Invalid value for the `side` attribute.
        UnknownSide(side: String) {
            display("Invalid view side '{}', expected one of coronal, sagittal, lateral, medial", side)
        }

        /// Invalid value for the `hemi` attribute.
        UnknownHemi(hemi: String) {
            display("Invalid hemisphere '{}', expected one of left, right, midline", hemi)
        }

        UnknownPalette(name: String) {
            display("No palette named '{}'", name)
        }

        InvalidColor(spec: String) {
            display("Cannot parse color '{}'", spec)
        }

        /// More views were requested than the panel grid can hold.
        InvalidLayout(views: usize, rows: usize, cols: usize) {
            display("Cannot place {} views into a {}x{} panel grid", views, rows, cols)
        }

        /// The drawing backend failed while exporting a figure.
        Render(msg: String) {
            display("Rendering failed: {}", msg)
        }

        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, GgsegError>;
