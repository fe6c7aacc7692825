//! Contains the PlaneMapper struct, which relates the pixel grid --
//! origin at 0,0, columns growing rightward, rows growing downward --
//! to a rectangle on the complex plane described by its leftlower and
//! rightupper corners.
use num::Complex;

/// The column and row of a cell on the pixel grid.  Column first,
/// because that is the x,y reading order of the plane it maps onto.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps the cells of a width x height pixel grid onto points of a
/// rectangle on the complex plane, treating the real part of a complex
/// number as the x-component and the imaginary part as the
/// y-component.  Row zero lands on the leftlower edge, so rows sweep
/// the imaginary axis upward as they move down the grid.
#[derive(Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    origin: Complex<f64>,
    // Pixels per plane unit along each axis.  Dividing a column or row
    // by these yields the offset from the origin corner.
    grid_factors: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the grid dimensions and the two corners of
    /// the complex rectangle the grid is stretched over.
    ///
    /// Preconditions, unchecked: `width` and `height` are positive, and
    /// `leftlower` lies strictly left of and below `rightupper`.  Both
    /// are owned by trusted callers here, so nothing validates them.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> PlaneMapper {
        let region_width = rightupper.re - leftlower.re;
        let region_height = rightupper.im - leftlower.im;

        PlaneMapper {
            width,
            height,
            origin: leftlower,
            grid_factors: (
                (width as f64) / region_width,
                (height as f64) / region_height,
            ),
        }
    }

    /// Grid width, in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height, in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of cells in the grid.  Used to size buffers.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the grid holds no cells at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Given a cell of the pixel grid, return the complex number at the
    /// equivalent location on the complex rectangle.  Cell (0,0) sits
    /// exactly on the leftlower corner; the far cells stop one grid
    /// step short of the rightupper corner.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            ((pixel.0 as f64) / self.grid_factors.0) + self.origin.re,
            ((pixel.1 as f64) / self.grid_factors.1) + self.origin.im,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(width: usize, height: usize) -> PlaneMapper {
        PlaneMapper::new(
            width,
            height,
            Complex::new(-2.0, -2.0),
            Complex::new(2.0, 2.0),
        )
    }

    #[test]
    fn corner_cell_sits_on_the_leftlower_corner() {
        assert_eq!(
            square(1920, 1080).pixel_to_point(&Pixel(0, 0)),
            Complex::new(-2.0, -2.0)
        );
    }

    #[test]
    fn far_cell_stops_one_step_short_of_rightupper() {
        let pm = square(8, 4);
        let point = pm.pixel_to_point(&Pixel(7, 3));
        assert!((point.re - (2.0 - 4.0 / 8.0)).abs() < 1e-12);
        assert!((point.im - (2.0 - 4.0 / 4.0)).abs() < 1e-12);
    }

    #[test]
    fn center_cell_of_an_even_grid_is_the_plane_origin() {
        assert_eq!(
            square(4, 4).pixel_to_point(&Pixel(2, 2)),
            Complex::new(0.0, 0.0)
        );
        assert_eq!(
            square(640, 480).pixel_to_point(&Pixel(320, 240)),
            Complex::new(0.0, 0.0)
        );
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let pm = PlaneMapper::new(5, 5, Complex::new(0.0, 0.0), Complex::new(5.0, 5.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 4.0));
    }

    #[test]
    fn len_counts_every_cell() {
        let pm = square(1920, 1080);
        assert_eq!(pm.len(), 1920 * 1080);
        assert!(!pm.is_empty());
    }
}
