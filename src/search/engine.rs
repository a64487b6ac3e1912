/// The supported search backends. Each variant knows its own request
/// parameter shape; `GLocation` is Google with a resolved location
/// parameter attached by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    Baidu,
    Bing,
    DuckDuckGo,
    GLocation,
    Google,
    Naver,
    Yahoo,
    Yandex,
}

impl Engine {
    pub const ALL: [Engine; 8] = [
        Engine::Baidu,
        Engine::Bing,
        Engine::DuckDuckGo,
        Engine::GLocation,
        Engine::Google,
        Engine::Naver,
        Engine::Yahoo,
        Engine::Yandex,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Engine::Baidu => "baidu",
            Engine::Bing => "bing",
            Engine::DuckDuckGo => "duckduckgo",
            Engine::GLocation => "glocation",
            Engine::Google => "google",
            Engine::Naver => "naver",
            Engine::Yahoo => "yahoo",
            Engine::Yandex => "yandex",
        }
    }

    /// The engine identifier the API expects.
    pub fn api_name(&self) -> &'static str {
        match self {
            Engine::GLocation => "google",
            other => other.name(),
        }
    }

    /// Query parameters for one result page, minus the API key (and minus
    /// the location parameter for `GLocation`, which needs a lookup first).
    pub fn query_params(
        &self,
        query: &str,
        page_index: usize,
        per_page: usize,
    ) -> Vec<(String, String)> {
        let start = (page_index * per_page).to_string();
        let mut params = vec![
            ("engine".to_string(), self.api_name().to_string()),
            ("num".to_string(), per_page.to_string()),
        ];

        match self {
            Engine::Bing => {
                params.push(("q".to_string(), query.to_string()));
                params.push(("cc".to_string(), "US".to_string()));
                params.push(("start".to_string(), start));
            }
            Engine::Yahoo => {
                params.push(("p".to_string(), query.to_string()));
                params.push(("start".to_string(), start));
            }
            Engine::Yandex => {
                params.push(("text".to_string(), query.to_string()));
            }
            Engine::GLocation => {
                params.push(("q".to_string(), query.to_string()));
            }
            Engine::Baidu | Engine::DuckDuckGo | Engine::Google | Engine::Naver => {
                params.push(("q".to_string(), query.to_string()));
                params.push(("start".to_string(), start));
            }
        }

        params
    }
}

impl std::str::FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::ALL
            .iter()
            .find(|engine| engine.name() == s.to_lowercase())
            .copied()
            .ok_or_else(|| {
                let names: Vec<&str> = Engine::ALL.iter().map(|e| e.name()).collect();
                format!(
                    "invalid engine: {} (choose from {}, or 'all', or 'american')",
                    s,
                    names.join(", ")
                )
            })
    }
}

/// What the user asked to run: one engine, every engine, or the American
/// subset (everything except baidu, naver, and yandex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineSelection {
    Single(Engine),
    All,
    American,
}

impl EngineSelection {
    pub fn engines(&self) -> Vec<Engine> {
        match self {
            EngineSelection::Single(engine) => vec![*engine],
            EngineSelection::All => Engine::ALL.to_vec(),
            EngineSelection::American => Engine::ALL
                .iter()
                .filter(|e| !matches!(e, Engine::Baidu | Engine::Naver | Engine::Yandex))
                .copied()
                .collect(),
        }
    }
}

impl std::str::FromStr for EngineSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(EngineSelection::All),
            "american" => Ok(EngineSelection::American),
            other => other.parse::<Engine>().map(EngineSelection::Single),
        }
    }
}
