//! Static copy shown by the presentational pages

pub const APP_NAME: &str = "QuantaWeather";
pub const TAGLINE: &str = "Revolutionizing weather forecasts with precision and speed.";
pub const HERO_TITLE: &str = "Quantum Technology Meets Climate Science";
pub const ABOUT_TITLE: &str = "About QuantaWeather";

pub struct CityCard {
    pub location: &'static str,
    pub temperature: i32,
    pub condition: &'static str,
    pub humidity: u8,
    pub wind_speed: u16,
}

pub const HOME_CARDS: [CityCard; 4] = [
    CityCard {
        location: "New Delhi",
        temperature: 23,
        condition: "Partly Cloudy",
        humidity: 65,
        wind_speed: 12,
    },
    CityCard {
        location: "Mumbai",
        temperature: 18,
        condition: "Sunny",
        humidity: 55,
        wind_speed: 8,
    },
    CityCard {
        location: "Chennai",
        temperature: 30,
        condition: "Rainy",
        humidity: 75,
        wind_speed: 10,
    },
    CityCard {
        location: "Bangalore",
        temperature: 35,
        condition: "Sunny",
        humidity: 79,
        wind_speed: 12,
    },
];

pub struct Story {
    pub title: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
}

pub const NEWS: [Story; 4] = [
    Story {
        title: "Quantum Weather Prediction",
        description: "How quantum computing is revolutionizing weather forecasting",
        image_url: "https://images.unsplash.com/photo-1590055531615-f16d36ffe8ec?auto=format&fit=crop&w=800&q=80",
    },
    Story {
        title: "Climate Science Update",
        description: "Latest breakthroughs in atmospheric modeling",
        image_url: "https://images.unsplash.com/photo-1542641728-6ca359b085f4?auto=format&fit=crop&w=800&q=80",
    },
    Story {
        title: "Global Warming Effects",
        description: "Understanding the impact of global warming on our planet",
        image_url: "https://images.unsplash.com/photo-1488521787991-ed7bbaae773c?auto=format&fit=crop&w=800&q=80",
    },
    Story {
        title: "Weather Patterns and You",
        description: "How weather patterns affect daily life",
        image_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQFiqJ4P_DqSmp_JUtQhO2Uz5YU5GFxha7VhA&s",
    },
];

pub const ABOUT_INTRO: [&str; 2] = [
    "QuantaWeather leverages cutting-edge technologies to transform weather forecasting. \
     Combining quantum computing, quantum neural networks and a Flask backend, we aim to \
     revolutionize climate modeling and predict extreme weather events with precision.",
    "Our approach bridges the gap between technology and science, creating a platform that \
     offers actionable insights for shaping effective climate policies.",
];

pub const ABOUT_SECTIONS: [(&str, &str); 3] = [
    (
        "Revolutionizing Climate Modeling",
        "As the impacts of climate change intensify, the demand for accurate and efficient \
         climate modeling has become critical. Classical models often struggle to simulate the \
         complex interactions within the Earth's climate systems.",
    ),
    (
        "Harnessing Quantum Power",
        "QuantaWeather uses quantum algorithms to model climate dynamics with unprecedented \
         precision, enabling better predictions of extreme weather events.",
    ),
    (
        "A Fusion of Technology and Science",
        "This project fuses quantum technology and climate science to inform better \
         decision-making in a rapidly changing world.",
    ),
];

pub const ABOUT_CARDS: [Story; 3] = [
    Story {
        title: "Quantum Computing in Weather Forecasting",
        description: "How quantum algorithms enhance accuracy and precision in weather forecasting.",
        image_url: "https://images.unsplash.com/photo-1590055531615-f16d36ffe8ec?auto=format&fit=crop&w=800&q=80",
    },
    Story {
        title: "Quantum Neural Networks",
        description: "Quantum neural networks simulate complex atmospheric patterns.",
        image_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcQejqeOTu2lsLDSNB6gpc8xcghYFUA2dqAJGQ&s",
    },
    Story {
        title: "Backend Powered by Flask",
        description: "Flask services connect the quantum models to this client.",
        image_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcSS7A9gjFpvumkChG3RNh3NFhPAX98i6DCYEw&s",
    },
];

pub const CONTACT_TEXT: &str = "If you have any questions or need assistance, feel free to \
    contact us at support@quantaweather.com.";

pub const WELCOME_TITLE: &str = "Welcome to QuantaWeather";
pub const WELCOME_TEXT: &str = "Experience the future of weather forecasting powered by \
    quantum computing and machine learning.";

pub const FOOTER_TEAM: &str = "Team: QuantWeather (Dhruv, Akarsh, Hemanth, Zayn)";
pub const FOOTER_EMAIL: &str = "info@quantweather.com";
pub const FOOTER_COPYRIGHT: &str = "\u{a9} 2024 QuantWeather. All rights reserved.";

pub const DATA_SOURCES: [&str; 4] = [
    "Satellite Data",
    "Ground Stations",
    "Machine Learning Models",
    "Historical Data",
];

/// Every remote image the home and about pages show
pub fn artwork_urls() -> Vec<&'static str> {
    let mut urls: Vec<&'static str> = NEWS
        .iter()
        .chain(ABOUT_CARDS.iter())
        .map(|story| story.image_url)
        .collect();
    urls.sort_unstable();
    urls.dedup();
    urls
}
