use city_model::RoadType;
use cityutil::Tags;

/// What a way becomes in the city model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feature {
    Road(RoadType),
    Building,
}

/// Roads take priority: a way tagged both `highway=primary` and `building=yes` is a road. Ways
/// that are neither, like parks or footpaths, are None.
pub fn classify(tags: &Tags) -> Option<Feature> {
    if let Some(rt) = tags.get("highway").and_then(|v| RoadType::from_tag(v)) {
        return Some(Feature::Road(rt));
    }
    if tags.has_value("building") {
        return Some(Feature::Building);
    }
    None
}
