use serde::Deserialize;

/// `GET /api/v3/movie/lookup/imdb` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RadarrMovie {
    pub title: Option<String>,
    pub year: Option<i32>,
}

/// One element of `GET /api/v3/series/lookup`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SonarrSeries {
    pub title: Option<String>,
    pub tvdb_id: Option<i64>,
}
