//! Built-in catalog: the twenty brightest stars and a handful of
//! constellation edges between them.

use super::catalog::{Catalog, Constellation, Edge, Star};

/// (name, ra, dec, magnitude, distance ly, description)
const STARS: [(&str, f32, f32, f32, f32, &str); 20] = [
    ("Sirius", 101.28, -16.72, -1.46, 8.6,
     "Sirius, the brightest star in our night sky, shines with intense blue-white light from the constellation Canis Major. Located 8.6 light-years away, this binary star system has been guiding navigators and fascinating astronomers for millennia with its brilliant luminosity."),
    ("Canopus", 95.99, -52.70, -0.74, 310.0,
     "Canopus stands as the second brightest star visible from Earth, blazing forth from the constellation Carina. This yellow-white supergiant, located 310 light-years distant, serves as a crucial navigation beacon for spacecraft and has cultural significance across many civilizations."),
    ("Arcturus", 213.92, 19.18, -0.05, 37.0,
     "Arcturus, a red giant star in Bo√∂tes constellation, marks the end of the Big Dipper's handle when extended. At 37 light-years away, this ancient star moves unusually fast through space, suggesting it originated from a different part of our galaxy."),
    ("Vega", 279.23, 38.78, 0.03, 25.0,
     "Vega, the brilliant blue-white star in Lyra constellation, served as the northern pole star 12,000 years ago and will be again in 13,727 CE. Located 25 light-years away, it was humanity's first photographed star and remains a standard for astronomical measurements."),
    ("Capella", 79.17, 45.99, 0.08, 43.0,
     "Capella, the brightest star in Auriga constellation, appears as a single golden star but is actually a complex system of four stars. Located 43 light-years away, this stellar family includes two red dwarfs orbiting two yellow giants in an intricate cosmic dance."),
    ("Rigel", 78.63, -8.20, 0.13, 860.0,
     "Rigel, the brilliant blue supergiant in Orion constellation, outshines even mighty Betelgeuse despite being designated Beta Orionis. Located 860 light-years away, this stellar powerhouse burns 120,000 times brighter than our Sun and illuminates the surrounding nebular regions with its intense radiation."),
    ("Procyon", 114.83, 5.22, 0.34, 11.5,
     "Procyon, the little dog star in Canis Minor, forms part of the Winter Triangle with Sirius and Betelgeuse. This binary system, just 11.5 light-years away, consists of a yellow-white main sequence star and a white dwarf companion in a 40-year orbital dance."),
    ("Betelgeuse", 88.79, 7.41, 0.50, 650.0,
     "Betelgeuse, the red supergiant marking Orion's shoulder, represents one of the largest known stars. Located 650 light-years away, this stellar giant varies in brightness and is destined to explode as a supernova, potentially visible during daytime when it occurs."),
    ("Achernar", 24.43, -57.24, 0.46, 139.0,
     "Achernar, the flattened star at the end of Eridanus river constellation, spins so rapidly it's oblate rather than spherical. Located 139 light-years away, this blue star rotates at nearly breakup velocity, creating an equatorial bulge and stellar disk."),
    ("Hadar", 210.96, -60.37, 0.61, 390.0,
     "Hadar, also known as Beta Centauri, serves as one of the Southern Cross's pointer stars alongside Alpha Centauri. This blue giant system, 390 light-years distant, consists of three stars and helps navigators locate the smallest constellation in our sky."),
    ("Altair", 297.70, 8.87, 0.77, 17.0,
     "Altair, the eagle star in Aquila constellation, forms the Summer Triangle with Vega and Deneb. Located just 17 light-years away, this rapidly rotating white star spins once every 9 hours, causing it to bulge at its equator and vary in brightness."),
    ("Acrux", 186.65, -63.10, 0.76, 320.0,
     "Acrux, the brightest star in the Southern Cross constellation, marks the bottom of this iconic celestial formation. Located 320 light-years away, this multiple star system consists of hot blue stars that illuminate the nearby Coalsack Nebula with their intense ultraviolet radiation."),
    ("Aldebaran", 68.98, 16.51, 0.85, 65.0,
     "Aldebaran, the red eye of Taurus the Bull, appears to lead the Hyades star cluster but lies much closer to Earth. This orange giant, 65 light-years away, represents one of the four 'royal stars' of ancient Persia and marks the bull's glaring eye."),
    ("Spica", 201.30, -11.16, 0.97, 250.0,
     "Spica, the wheat sheaf star in Virgo constellation, appears as a single blue star but consists of two hot stars orbiting every four days. Located 250 light-years away, this eclipsing binary helped ancient astronomers discover the precession of Earth's axis through careful observations."),
    ("Antares", 247.35, -26.43, 1.09, 600.0,
     "Antares, the heart of Scorpius constellation, rivals Mars in its red appearance, earning its name meaning 'rival of Mars.' This red supergiant, 600 light-years distant, is so large that if placed at our Sun's position, it would engulf the orbit of Mars."),
    ("Pollux", 116.33, 28.03, 1.14, 34.0,
     "Pollux, the brighter twin in Gemini constellation, shines as an orange giant star with a confirmed exoplanet. Located 34 light-years away, this evolved star has exhausted its hydrogen fuel and expanded to become cooler but larger than our Sun."),
    ("Fomalhaut", 344.41, -29.62, 1.16, 25.0,
     "Fomalhaut, the lonely autumn star in Piscis Austrinus constellation, stands isolated in an otherwise empty region of sky. This young star, 25 light-years away, is surrounded by a debris disk that may harbor forming planets, making it a key target for exoplanet research."),
    ("Deneb", 310.36, 45.28, 1.25, 2600.0,
     "Deneb, the distant beacon in Cygnus constellation, forms the Summer Triangle's most remote vertex. Located 2,600 light-years away, this blue supergiant is one of the most luminous stars known, shining with the brightness of 200,000 Suns across vast interstellar distances."),
    ("Regulus", 152.09, 11.97, 1.35, 79.0,
     "Regulus, the heart of Leo constellation, marks the base of the backwards question mark forming the lion's mane. This blue-white star, 79 light-years away, spins so rapidly it's nearly oblate and has been known since ancient times as the 'little king' star."),
    ("Adhara", 104.66, -28.97, 1.50, 430.0,
     "Adhara, the second brightest star in Canis Major constellation, shines as a hot blue giant in the southern sky. Located 430 light-years away, this star was much brighter in Earth's past when our solar system was closer to it during our galactic orbit."),
];

/// (constellation, [(from, to)])
const CONSTELLATIONS: [(&str, &[(&str, &str)]); 4] = [
    ("Orion", &[("Betelgeuse", "Rigel"), ("Rigel", "Betelgeuse")]),
    ("Canis Major", &[("Sirius", "Adhara")]),
    ("Leo", &[("Regulus", "Regulus")]),
    ("Gemini", &[("Pollux", "Procyon")]),
];

/// The catalog shipped with the app.
pub fn builtin_catalog() -> Catalog {
    let stars = STARS
        .iter()
        .map(|&(name, ra, dec, magnitude, distance, description)| {
            Star::new(name, ra, dec, magnitude)
                .with_distance(distance)
                .with_description(description)
        })
        .collect();

    let constellations = CONSTELLATIONS
        .iter()
        .map(|&(name, edges)| {
            Constellation::new(
                name,
                edges.iter().map(|&(from, to)| Edge::new(from, to)).collect(),
            )
        })
        .collect();

    // Names above are unique, so skip validation.
    Catalog {
        stars,
        constellations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_is_valid() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.constellations.len(), 4);
        assert!(Catalog::new(catalog.stars.clone(), catalog.constellations.clone()).is_ok());
    }

    #[test]
    fn every_edge_resolves() {
        let catalog = builtin_catalog();
        for c in &catalog.constellations {
            for e in &c.edges {
                assert!(catalog.star(&e.from).is_some(), "{} missing", e.from);
                assert!(catalog.star(&e.to).is_some(), "{} missing", e.to);
            }
        }
    }

    #[test]
    fn descriptions_are_the_catalog_text() {
        let catalog = builtin_catalog();
        let sirius = catalog.star("Sirius").unwrap();
        assert!(sirius.description.starts_with("Sirius, the brightest star in our night sky"));
        assert!(sirius.description.ends_with("with its brilliant luminosity."));
        let adhara = catalog.star("Adhara").unwrap();
        assert!(adhara.description.starts_with("Adhara"));
        assert!(catalog.stars.iter().all(|s| s.description.len() > 100));
    }

    #[test]
    fn sirius_is_first_and_brightest() {
        let catalog = builtin_catalog();
        let sirius = &catalog.stars[0];
        assert_eq!(sirius.name, "Sirius");
        assert!(catalog.stars.iter().all(|s| s.magnitude >= sirius.magnitude));
    }
}
