//! The `kentei init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create kentei.toml
    if std::path::Path::new("kentei.toml").exists() {
        println!("kentei.toml already exists, skipping.");
    } else {
        std::fs::write("kentei.toml", SAMPLE_CONFIG)?;
        println!("Created kentei.toml");
    }

    // Create a small offline pool to try the flow with
    let pool_path = std::path::Path::new("pool.sample.json");
    if pool_path.exists() {
        println!("pool.sample.json already exists, skipping.");
    } else {
        std::fs::write(pool_path, SAMPLE_POOL)?;
        println!("Created pool.sample.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit kentei.toml with your store URL and API key");
    println!("  2. Run: kentei validate --pool pool.sample.json");
    println!("  3. Run: kentei exam --pool pool.sample.json --lenient");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# kentei configuration

default_store = "postgrest"
time_limit_secs = 3600
handoff_file = "kentei-session.json"

[stores.postgrest]
type = "postgrest"
url = "${KENTEI_STORE_URL}"
api_key = "${KENTEI_STORE_KEY}"

[stores.local]
type = "memory"
pool_file = "pool.sample.json"
"#;

const SAMPLE_POOL: &str = r#"[
  {
    "id": 1,
    "category": "knowledge",
    "text": "What does a hectopascal measure?",
    "options": {
      "a": "Air pressure",
      "b": "Humidity",
      "c": "Wind speed",
      "d": "Rainfall"
    },
    "answer": "A",
    "explanation": "Surface pressure charts are drawn in hectopascals."
  },
  {
    "id": 2,
    "category": "knowledge",
    "text": "Which cloud type towers vertically and brings thunderstorms?",
    "options": {
      "a": "Cirrus",
      "b": "Cumulonimbus",
      "c": "Stratus",
      "d": "Altostratus"
    },
    "answer": "B"
  },
  {
    "id": 3,
    "category": "disaster",
    "text": "What should you do first when a flood advisory is issued for your area?",
    "options": {
      "a": "Check your evacuation route",
      "b": "Drive to the river to look",
      "c": "Wait for the warning to be upgraded",
      "d": "Close the curtains"
    },
    "answer": "A"
  },
  {
    "id": 4,
    "category": "disaster",
    "text": "A linear rainband is dangerous because it",
    "options": {
      "a": "moves quickly out to sea",
      "b": "keeps regenerating over the same area",
      "c": "only forms in winter",
      "d": "weakens after sunset"
    },
    "answer": "B",
    "explanation": "New cells keep forming along the same line, so rain totals climb fast."
  },
  {
    "id": 5,
    "category": "life",
    "text": "Laundry dries fastest on a day with",
    "options": {
      "a": "high humidity and calm air",
      "b": "low humidity and a steady breeze",
      "c": "fog in the morning",
      "d": "light drizzle"
    },
    "answer": "B"
  },
  {
    "id": 6,
    "category": "life",
    "text": "When a heatstroke alert is issued you should",
    "options": {
      "a": "exercise outdoors at noon",
      "b": "cut back on drinking water",
      "c": "rest in the shade and hydrate",
      "d": "seal every window"
    },
    "answer": "C"
  },
  {
    "id": 7,
    "category": "culture",
    "text": "The saying 'evening glow means fair weather' works because",
    "options": {
      "a": "weather moves east to west",
      "b": "weather generally moves west to east",
      "c": "sunsets raise the pressure",
      "d": "red light dries the air"
    },
    "answer": "B",
    "explanation": "A clear western sky at sunset usually arrives overhead the next day."
  },
  {
    "id": 8,
    "category": "culture",
    "text": "Which traditional calendar term marks the start of spring?",
    "options": {
      "a": "Risshun",
      "b": "Geshi",
      "c": "Shosho",
      "d": "Touji"
    },
    "answer": "A"
  }
]
"#;
