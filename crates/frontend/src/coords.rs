/// Convert client (viewport) coordinates to container-relative pixel coordinates.
pub fn client_to_container(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

/// Bounding client rect of the element with `id`.
pub fn element_rect(id: &str) -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(id)?;
    Some(element.get_bounding_client_rect())
}

/// Width and height of the element with `id`, if it is laid out.
pub fn element_size(id: &str) -> Option<(f64, f64)> {
    let rect = element_rect(id)?;
    let (w, h) = (rect.width(), rect.height());
    (w > 0.0 && h > 0.0).then_some((w, h))
}

/// Client coordinates of a pointer event, relative to the element with `id`.
pub fn client_to_element(client_x: f64, client_y: f64, id: &str) -> Option<(f64, f64)> {
    let rect = element_rect(id)?;
    Some(client_to_container(client_x, client_y, rect.left(), rect.top()))
}

/// Euclidean distance between two container points.
pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_container_origin() {
        let (x, y) = client_to_container(100.0, 200.0, 100.0, 200.0);
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_container_offset() {
        let (x, y) = client_to_container(450.0, 350.0, 320.0, 50.0);
        assert!((x - 130.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_distance() {
        assert!((distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-9);
        assert!(distance((2.0, 2.0), (2.0, 2.0)).abs() < 1e-9);
    }
}
