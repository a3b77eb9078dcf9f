//! Built-in exercise catalog.
//!
//! The catalog is static reference data and is never modified at runtime.

use log::error;

use crate::{BodyPart, Exercise, ExerciseID, Name};

struct CatalogEntry {
    id: &'static str,
    name: &'static str,
    body_part: BodyPart,
    equipment: &'static str,
    image: &'static str,
    description: &'static str,
}

impl TryFrom<&CatalogEntry> for Exercise {
    type Error = Box<dyn std::error::Error>;

    fn try_from(value: &CatalogEntry) -> Result<Self, Self::Error> {
        Ok(Exercise {
            id: ExerciseID::new(value.id)?,
            name: Name::new(value.name)?,
            body_part: value.body_part,
            equipment: value.equipment.to_string(),
            image: value.image.to_string(),
            description: value.description.to_string(),
            video_url: None,
            beginner_tips: None,
        })
    }
}

pub static EXERCISES: std::sync::LazyLock<Vec<Exercise>> = std::sync::LazyLock::new(|| {
    CATALOG
        .iter()
        .filter_map(|entry| match Exercise::try_from(entry) {
            Ok(exercise) => Some(exercise),
            Err(err) => {
                error!("invalid catalog entry {}: {err}", entry.id);
                None
            }
        })
        .collect()
});

#[must_use]
pub fn exercise(id: &ExerciseID) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == *id)
}

const CATALOG: [CatalogEntry; 20] = [
    CatalogEntry {
        id: "1",
        name: "Barbell Bench Press",
        body_part: BodyPart::Chest,
        equipment: "Barbell",
        image: "https://images.ctfassets.net/8urtyqugdt2l/4wPk3KafRwgpwIcJzb0VRX/4894054c6182c62c1d850628935a4b0b/desktop-best-chest-exercises.jpg",
        description: "The primary lift for building mass in the chest, shoulders, and triceps. Lie on a flat bench, grip the bar slightly wider than shoulder-width, and lower it slowly to your mid-chest before pressing it back up.",
    },
    CatalogEntry {
        id: "2",
        name: "Squat",
        body_part: BodyPart::Legs,
        equipment: "Barbell",
        image: "https://i0.wp.com/www.muscleandfitness.com/wp-content/uploads/2019/02/1109-Barbell-Back-Squat-GettyImages-614107160.jpg?quality=86&strip=all",
        description: "The 'King of Exercises' builds full-body strength, primarily targeting the quadriceps, hamstrings, and glutes. Keep your back straight, descend until your hips are below your knees, and drive through your heels.",
    },
    CatalogEntry {
        id: "3",
        name: "Deadlift",
        body_part: BodyPart::Back,
        equipment: "Barbell",
        image: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcSyqezJ89rmK1b30AXGwkCLrNX8J1ez2RRJgQ&s",
        description: "A full-body strength exercise that works the posterior chain. Stand with feet hip-width apart, grip the bar just outside your knees, and lift by extending your hips and knees, keeping the bar close to your body.",
    },
    CatalogEntry {
        id: "4",
        name: "Overhead Press",
        body_part: BodyPart::Shoulders,
        equipment: "Barbell",
        image: "https://media.post.rvohealth.io/wp-content/uploads/2019/04/overhead_press-1200x628-facebook.jpg",
        description: "A key lift for shoulder development and overall upper body strength. Press the bar straight up overhead until your arms are fully extended, keeping your core tight and avoiding leaning back.",
    },
    CatalogEntry {
        id: "5",
        name: "Pull-Up",
        body_part: BodyPart::Back,
        equipment: "Pull-up Bar",
        image: "https://sfhealthtech.com/cdn/shop/articles/dumbbell_exercises.jpg?v=1718622633",
        description: "An excellent bodyweight exercise for building a wider back. Grip the bar with palms facing away, slightly wider than shoulder-width. Pull your chest toward the bar until your chin is over it.",
    },
    CatalogEntry {
        id: "6",
        name: "Bicep Curl",
        body_part: BodyPart::Arms,
        equipment: "Dumbbells",
        image: "https://swolverine.com/cdn/shop/articles/Best_Dumbbell_Bicep_Exercises_e7fd9a22-6b74-49f5-a8eb-592de4461f50.jpg?v=1745901583&width=1920",
        description: "An isolation exercise focused on the biceps. Keep your elbows pinned to your sides and curl the weights up to your shoulders, squeezing the muscle at the top.",
    },
    CatalogEntry {
        id: "7",
        name: "Tricep Extension",
        body_part: BodyPart::Arms,
        equipment: "Dumbbell",
        image: "https://i0.wp.com/post.healthline.com/wp-content/uploads/2021/10/overhead-tricep-extension-dumbbell-1296x728-header.jpg?w=1155&h=1528",
        description: "Targets the triceps, the largest muscle in the arm. Hold a dumbbell overhead and slowly lower it behind your head by bending your elbows.",
    },
    CatalogEntry {
        id: "8",
        name: "Crunches",
        body_part: BodyPart::Core,
        equipment: "None",
        image: "https://hips.hearstapps.com/hmg-prod/images/shot-of-a-young-man-completing-crunches-royalty-free-image-1678721163.jpg?crop=0.87251xw:1xh;center,top&resize=1200:*",
        description: "A classic exercise for the abdominal muscles. Lie on your back with knees bent and lift your shoulders off the ground, contracting your abs.",
    },
    CatalogEntry {
        id: "9",
        name: "Plank",
        body_part: BodyPart::Core,
        equipment: "None",
        image: "https://4.bp.blogspot.com/-dp5asUmuPW8/VgQhP3Q_ZmI/AAAAAAAAHO8/Ys5eNdTrTzM/s1600/Plank-Forearm.jpg",
        description: "An isometric hold for core stability. Hold your body in a straight line, supported on your forearms and toes, engaging your abs and glutes.",
    },
    CatalogEntry {
        id: "10",
        name: "Leg Press",
        body_part: BodyPart::Legs,
        equipment: "Machine",
        image: "https://www.asphaltgreen.org/wp-content/uploads/2025/01/Leg_Press_Lowered-1-scaled.webp",
        description: "A lower-body exercise that isolates the quads and hamstrings. Sit on the machine and push the weight away from you using your legs.",
    },
    CatalogEntry {
        id: "11",
        name: "Lateral Raise",
        body_part: BodyPart::Shoulders,
        equipment: "Dumbbells",
        image: "https://www.trainheroic.com/wp-content/uploads/2023/01/AdobeStock_63335692-TH-jpg.webp",
        description: "Targets the lateral (side) deltoids for shoulder width. With dumbbells in hand, lift your arms out to the sides until they are parallel to the floor.",
    },
    CatalogEntry {
        id: "12",
        name: "Lunges",
        body_part: BodyPart::Legs,
        equipment: "Dumbbells",
        image: "https://hips.hearstapps.com/hmg-prod/images/muscular-man-training-his-legs-doing-lunges-with-royalty-free-image-1677586874.jpg?crop=0.667xw:1.00xh;0.236xw,0&resize=1200:*",
        description: "A unilateral exercise for building leg strength and balance. Step forward, lowering your hips until both knees are bent at a 90-degree angle.",
    },
    CatalogEntry {
        id: "13",
        name: "Push-Up",
        body_part: BodyPart::Chest,
        equipment: "None",
        image: "https://www.performancehealth.com/media/amasty/blog/cache/5/-/1033/581/5-techniques-for-achieving-the-perfect-push-up-form.jpeg",
        description: "A foundational bodyweight exercise for the chest, shoulders, and triceps. Keep your body in a straight line from head to heels and push up and down.",
    },
    CatalogEntry {
        id: "14",
        name: "Row Machine",
        body_part: BodyPart::Back,
        equipment: "Machine",
        image: "https://www.puregym.com/media/0epkvais/seated-row.jpg?quality=80",
        description: "A full-body cardio and strength workout. Push with your legs, lean back slightly, and pull the handle to your abdomen in a smooth motion.",
    },
    CatalogEntry {
        id: "15",
        name: "Cable Fly",
        body_part: BodyPart::Chest,
        equipment: "Cables",
        image: "https://www.barbellmedicine.com/wp-content/uploads/2023/12/Cable-Chest-Press.jpg",
        description: "An isolation exercise that targets the inner chest. Stand between the cable stacks, grab the handles, and bring your hands together in front of your chest.",
    },
    CatalogEntry {
        id: "16",
        name: "Barbell Row",
        body_part: BodyPart::Back,
        equipment: "Barbell",
        image: "https://images.pexels.com/photos/841130/pexels-photo-841130.jpeg?auto=compress&cs=tinysrgb&w=800&h=600",
        description: "Excellent for building back thickness. Hinge at the hips, keeping your back straight, and pull the barbell to your lower chest/abdomen.",
    },
    CatalogEntry {
        id: "17",
        name: "Calf Raise",
        body_part: BodyPart::Legs,
        equipment: "Machine",
        image: "https://cdn.muscleandstrength.com/sites/default/files/seated-calf-raise-1.jpg",
        description: "Targets the calf muscles. Stand on a block with the balls of your feet and raise your heels as high as possible.",
    },
    CatalogEntry {
        id: "18",
        name: "Hanging Leg Raise",
        body_part: BodyPart::Core,
        equipment: "Pull-up Bar",
        image: "https://miro.medium.com/v2/resize:fit:1400/0*Mly7U-TaaUvMxnpW",
        description: "An advanced core exercise. Hang from a bar and raise your legs up to 90 degrees or higher.",
    },
    CatalogEntry {
        id: "19",
        name: "Dumbbell Fly",
        body_part: BodyPart::Chest,
        equipment: "Dumbbells",
        image: "https://media.post.rvohealth.io/wp-content/uploads/2020/08/11571-Incline_vs_Flat_Bench_Wha_Best_for_Your_Chest-_732x549-thumbnail-732x549.jpg",
        description: "Focuses on stretching and isolating the chest. Lie on a flat bench and lower dumbbells out to the sides with a slight bend in your elbows.",
    },
    CatalogEntry {
        id: "20",
        name: "Shoulder Shrug",
        body_part: BodyPart::Shoulders,
        equipment: "Dumbbells",
        image: "https://i0.wp.com/www.muscleandfitness.com/wp-content/uploads/2013/07/dumbbell-shrug.jpg?quality=86&strip=all",
        description: "Primarily targets the trapezius muscles. Hold heavy dumbbells and shrug your shoulders straight up toward your ears.",
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_exercises() {
        assert_eq!(EXERCISES.len(), CATALOG.len());

        for (exercise, entry) in EXERCISES.iter().zip(CATALOG.iter()) {
            assert_eq!(exercise.id.as_str(), entry.id);
            assert!(!exercise.equipment.is_empty());
            assert!(exercise.image.starts_with("https://"));
            assert!(!exercise.description.is_empty());
        }
    }

    #[test]
    fn test_catalog_duplicate_ids() {
        let mut ids = HashSet::new();

        for entry in CATALOG {
            let id = entry.id;
            assert!(!ids.contains(id), "duplicate id {id}");
            ids.insert(id);
        }
    }

    #[test]
    fn test_catalog_duplicate_names() {
        let mut names = HashSet::new();

        for entry in CATALOG {
            let name = entry.name;
            assert!(!names.contains(name), "duplicate name {name}");
            names.insert(name);
        }
    }

    #[test]
    fn test_catalog_covers_all_body_parts() {
        let body_parts = CATALOG
            .iter()
            .map(|e| e.body_part)
            .collect::<HashSet<_>>();

        for body_part in <BodyPart as crate::Property>::iter() {
            assert!(body_parts.contains(body_part), "missing {body_part}");
        }
    }

    #[test]
    fn test_exercise() {
        assert_eq!(
            exercise(&ExerciseID::new("10").unwrap()).map(|e| e.name.to_string()),
            Some(String::from("Leg Press"))
        );
        assert_eq!(exercise(&ExerciseID::new("99").unwrap()), None);
    }
}
