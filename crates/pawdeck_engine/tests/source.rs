use std::collections::HashSet;

use pawdeck_engine::{BatchRequest, ImageSource, DEFAULT_ENDPOINT};
use url::Url;

#[test]
fn candidates_carry_geometry_and_unique_tokens() {
    let source = ImageSource::new("https://cats.example/cat").expect("endpoint parses");
    let request = BatchRequest {
        count: 10,
        width: 360,
        height: 480,
    };

    let candidates = source.candidates(&request);
    assert_eq!(candidates.len(), 10);

    let mut tokens = HashSet::new();
    for (position, candidate) in candidates.iter().enumerate() {
        assert_eq!(candidate.index, position as u32);

        let url = Url::parse(&candidate.url).expect("candidate url parses");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("width".to_string(), "360".to_string())));
        assert!(pairs.contains(&("height".to_string(), "480".to_string())));

        let token = pairs
            .iter()
            .find(|(k, _)| k == "random")
            .map(|(_, v)| v.clone())
            .expect("cache-bust token present");
        tokens.insert(token);
    }

    // Tokens must not collide across concurrent requests in a session.
    assert_eq!(tokens.len(), 10);
}

#[test]
fn rejects_an_unparsable_endpoint() {
    assert!(ImageSource::new("not a url").is_err());
}

#[test]
fn default_endpoint_parses() {
    let source = ImageSource::default();
    let request = BatchRequest {
        count: 1,
        width: 100,
        height: 133,
    };
    let candidates = source.candidates(&request);
    assert!(candidates[0].url.starts_with(DEFAULT_ENDPOINT));
}
