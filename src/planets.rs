use std::fmt;
use std::str::FromStr;

/// Planets served by the shuttle market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    pub const ALL: [Planet; 8] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Planet::Mercury => "Mercury",
            Planet::Venus => "Venus",
            Planet::Earth => "Earth",
            Planet::Mars => "Mars",
            Planet::Jupiter => "Jupiter",
            Planet::Saturn => "Saturn",
            Planet::Uranus => "Uranus",
            Planet::Neptune => "Neptune",
        }
    }

    /// Planets with a direct shuttle connection from this one, in preference order
    pub fn connections(self) -> &'static [Planet] {
        use Planet::*;
        match self {
            Mercury => &[Venus],
            Venus => &[Earth, Mercury],
            Earth => &[Jupiter, Uranus],
            Mars => &[Venus],
            Jupiter => &[Mars, Venus],
            Saturn => &[Earth, Neptune],
            Uranus => &[Saturn, Neptune],
            Neptune => &[Uranus, Mercury],
        }
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = String;

    /// Names are matched exactly, as they appear in price lists
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Planet::ALL
            .into_iter()
            .find(|planet| planet.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A single direct flight segment of a journey
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub from: Planet,
    pub to: Planet,
}

/// Find the route with the fewest hops between two planets.
///
/// All simple paths are enumerated depth-first in connection order and the
/// first one of minimal length wins, so ties resolve deterministically.
/// Returns `None` when the destination is unreachable. A journey from a planet
/// to itself has no hops.
pub fn shortest_route(from: Planet, destination: Planet) -> Option<Vec<Hop>> {
    let mut best: Option<Vec<Planet>> = None;
    let mut path = Vec::with_capacity(Planet::ALL.len());
    walk(from, destination, &mut path, &mut best);

    best.map(|planets| {
        planets
            .windows(2)
            .map(|pair| Hop {
                from: pair[0],
                to: pair[1],
            })
            .collect()
    })
}

fn walk(current: Planet, destination: Planet, path: &mut Vec<Planet>, best: &mut Option<Vec<Planet>>) {
    if path.contains(&current) {
        return;
    }
    path.push(current);

    if current == destination {
        if best.as_ref().is_none_or(|b| path.len() < b.len()) {
            *best = Some(path.clone());
        }
    } else {
        for &next in current.connections() {
            walk(next, destination, path, best);
        }
    }

    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use Planet::*;

    fn hops(route: &[Hop]) -> Vec<(Planet, Planet)> {
        route.iter().map(|h| (h.from, h.to)).collect()
    }

    #[test]
    fn test_parse_planet_names() {
        assert_eq!("Earth".parse::<Planet>(), Ok(Earth));
        assert_eq!("Neptune".parse::<Planet>(), Ok(Neptune));
        assert!("Pluto".parse::<Planet>().is_err());
        assert!("earth".parse::<Planet>().is_err());
    }

    #[test]
    fn test_direct_connection() {
        let route = shortest_route(Earth, Jupiter).unwrap();
        assert_eq!(hops(&route), vec![(Earth, Jupiter)]);
    }

    #[test]
    fn test_multi_hop_route() {
        let route = shortest_route(Earth, Mars).unwrap();
        assert_eq!(hops(&route), vec![(Earth, Jupiter), (Jupiter, Mars)]);
    }

    #[test]
    fn test_shorter_path_found_later_wins() {
        let route = shortest_route(Mercury, Neptune).unwrap();
        assert_eq!(
            hops(&route),
            vec![(Mercury, Venus), (Venus, Earth), (Earth, Uranus), (Uranus, Neptune)]
        );
    }

    #[test]
    fn test_every_planet_reaches_every_other() {
        for from in Planet::ALL {
            for to in Planet::ALL {
                let route = shortest_route(from, to).unwrap();
                if from == to {
                    assert!(route.is_empty());
                } else {
                    assert_eq!(route.first().unwrap().from, from);
                    assert_eq!(route.last().unwrap().to, to);
                    for pair in route.windows(2) {
                        assert_eq!(pair[0].to, pair[1].from);
                    }
                }
            }
        }
    }

    #[test]
    fn test_hops_follow_connections() {
        let route = shortest_route(Saturn, Mars).unwrap();
        for hop in &route {
            assert!(hop.from.connections().contains(&hop.to));
        }
    }
}
