/// Pages of the single-page client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    LandingPage,
    ResultsPage,
    RouteNotFound,
    InternalError,
}

impl View {
    pub fn component_name(self) -> &'static str {
        match self {
            View::LandingPage => "LandingPage",
            View::ResultsPage => "ResultsPage",
            View::RouteNotFound => "RouteNotFound",
            View::InternalError => "InternalError",
        }
    }

    fn title(self) -> &'static str {
        match self {
            View::LandingPage => "Plan your journey",
            View::ResultsPage => "Available journeys",
            View::RouteNotFound => "Page not found",
            View::InternalError => "Something went wrong",
        }
    }

    fn body(self) -> &'static str {
        match self {
            View::LandingPage => "Choose an origin and a destination planet to search the current price list.",
            View::ResultsPage => "Journeys offered by the latest price list, with total price and travel time.",
            View::RouteNotFound => "The page you asked for does not exist.",
            View::InternalError => "The service could not complete your request. Please try again later.",
        }
    }

    /// HTML fragment for this view; views take no arguments
    pub fn render(self) -> String {
        format!(
            "<section data-view=\"{}\"><h1>{}</h1><p>{}</p></section>",
            self.component_name(),
            self.title(),
            self.body()
        )
    }
}
