use super::{plan_route, GeoPoint, Route, Router, TransportMode};


#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    Start,
    End,
}

/// Two markers, a transport mode and the last computed route
#[derive(Clone, Debug, Default)]
pub struct MapPanel {
    start: Option<GeoPoint>,
    end: Option<GeoPoint>,
    mode: TransportMode,
    route: Option<Route>,
}

impl MapPanel {

    pub fn new() -> Self {
        Self::default()
    }

    /// First click places the start marker, the second the end marker,
    /// later clicks are ignored until a marker is removed
    pub fn click(&mut self, point: GeoPoint) -> Option<MarkerKind> {
        if self.start.is_none() {
            self.start = Some(point);
            Some(MarkerKind::Start)
        } else if self.end.is_none() {
            self.end = Some(point);
            Some(MarkerKind::End)
        } else {
            None
        }
    }

    /// Dragging a marker invalidates the current route
    pub fn move_marker(&mut self, kind: MarkerKind, point: GeoPoint) {
        match kind {
            MarkerKind::Start if self.start.is_some() => self.start = Some(point),
            MarkerKind::End if self.end.is_some() => self.end = Some(point),
            _ => return,
        }
        self.route = None;
    }

    pub fn remove_marker(&mut self, kind: MarkerKind) {
        match kind {
            MarkerKind::Start => self.start = None,
            MarkerKind::End => self.end = None,
        }
        self.route = None;
    }

    /// Remove both markers and the route
    pub fn clear(&mut self) {
        self.start = None;
        self.end = None;
        self.route = None;
    }

    pub fn reset_route(&mut self) {
        self.route = None;
    }

    pub fn set_mode(&mut self, mode: TransportMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> TransportMode {
        self.mode
    }

    pub fn marker(&self, kind: MarkerKind) -> Option<GeoPoint> {
        match kind {
            MarkerKind::Start => self.start,
            MarkerKind::End => self.end,
        }
    }

    pub fn can_calculate(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Plan a route between the markers, None while a marker is missing
    pub fn calculate<R>(&mut self, router: &R) -> Option<&Route>
    where
        R: Router + ?Sized,
    {
        let (start, end) = self.start.zip(self.end)?;
        self.route = Some(plan_route(router, start, end, self.mode));
        self.route.as_ref()
    }

    pub fn marker_label(&self, kind: MarkerKind) -> String {
        let name = match kind {
            MarkerKind::Start => "Start",
            MarkerKind::End => "End",
        };
        match self.marker(kind) {
            Some(point) => format!("{name}: {point}"),
            None => format!("{name}: Not selected"),
        }
    }

    pub fn distance_text(&self) -> String {
        self.route.as_ref().map_or_else(|| "0 km".to_string(), Route::distance_text)
    }

    pub fn duration_text(&self) -> String {
        self.route.as_ref().map_or_else(|| "0 min".to_string(), Route::duration_text)
    }
}
