//! Built-in exercise catalog: three desk-friendly exercises per category.

use super::{Category, Exercise, DEFAULT_DURATION_SECS};

fn exercise(
    id: &str,
    name: &str,
    description: &str,
    category: Category,
    instructions: &[&str],
) -> Exercise {
    Exercise {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        duration: DEFAULT_DURATION_SECS,
        category,
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
    }
}

/// The catalog a fresh install starts with, and what `reset` restores.
pub fn default_exercises() -> Vec<Exercise> {
    vec![
        exercise(
            "neck-1",
            "Neck Rolls",
            "Gentle circular neck movements to relieve tension",
            Category::Neck,
            &[
                "Sit up straight with shoulders relaxed",
                "Slowly roll your head in a clockwise circle",
                "Complete 5 circles, then reverse direction",
                "Keep movements slow and controlled",
            ],
        ),
        exercise(
            "neck-2",
            "Neck Side Stretch",
            "Lateral neck stretch to release side tension",
            Category::Neck,
            &[
                "Tilt your head to the right, ear toward shoulder",
                "Hold for 15 seconds",
                "Return to center and repeat on left side",
                "Keep shoulders down and relaxed",
            ],
        ),
        exercise(
            "neck-3",
            "Chin Tucks",
            "Forward head posture correction exercise",
            Category::Neck,
            &[
                "Sit tall with shoulders back",
                "Pull your chin back, creating a double chin",
                "Hold for 5 seconds, repeat 6 times",
                "Feel the stretch at the base of your skull",
            ],
        ),
        exercise(
            "shoulder-1",
            "Shoulder Rolls",
            "Release shoulder tension with gentle rolls",
            Category::Shoulders,
            &[
                "Roll shoulders up, back, and down in large circles",
                "Complete 10 rolls backward",
                "Then 10 rolls forward",
                "Keep movements smooth and controlled",
            ],
        ),
        exercise(
            "shoulder-2",
            "Shoulder Blade Squeeze",
            "Strengthen muscles between shoulder blades",
            Category::Shoulders,
            &[
                "Sit up straight with arms at sides",
                "Squeeze shoulder blades together",
                "Hold for 5 seconds, release",
                "Repeat 6 times",
            ],
        ),
        exercise(
            "shoulder-3",
            "Cross-Body Shoulder Stretch",
            "Stretch the posterior deltoid and upper back",
            Category::Shoulders,
            &[
                "Bring right arm across your body",
                "Use left hand to gently pull arm closer",
                "Hold for 15 seconds",
                "Repeat with left arm",
            ],
        ),
        exercise(
            "back-1",
            "Seated Spinal Twist",
            "Improve spinal mobility and reduce lower back tension",
            Category::Back,
            &[
                "Sit tall with feet flat on floor",
                "Place right hand on left knee",
                "Gently twist torso to the left",
                "Hold 15 seconds, repeat other side",
            ],
        ),
        exercise(
            "back-2",
            "Cat-Cow Stretch (Seated)",
            "Mobilize the spine while seated",
            Category::Back,
            &[
                "Sit on edge of chair, hands on knees",
                "Arch back and look up (cow pose)",
                "Round back and drop head (cat pose)",
                "Alternate slowly for 30 seconds",
            ],
        ),
        exercise(
            "back-3",
            "Upper Back Extension",
            "Counter forward head posture",
            Category::Back,
            &[
                "Interlace fingers behind head",
                "Open elbows wide",
                "Gently extend spine and lift chest",
                "Hold for 5 seconds, repeat 6 times",
            ],
        ),
        exercise(
            "hip-1",
            "Hip Flexor Stretch",
            "Stretch tight hip flexors from prolonged sitting",
            Category::Hips,
            &[
                "Stand beside your chair",
                "Step right foot back into a lunge",
                "Keep torso upright and push hips forward",
                "Hold 15 seconds each side",
            ],
        ),
        exercise(
            "hip-2",
            "Seated Figure-4 Stretch",
            "Hip opener for tight glutes and piriformis",
            Category::Hips,
            &[
                "Sit in chair with right ankle on left knee",
                "Gently lean forward until you feel a stretch",
                "Hold for 15 seconds",
                "Repeat with left ankle on right knee",
            ],
        ),
        exercise(
            "hip-3",
            "Hip Circles",
            "Dynamic hip mobility exercise",
            Category::Hips,
            &[
                "Stand with hands on hips",
                "Make large circles with your hips",
                "10 circles clockwise, 10 counterclockwise",
                "Keep upper body stable",
            ],
        ),
        exercise(
            "leg-1",
            "Calf Raises",
            "Improve circulation and strengthen calves",
            Category::Legs,
            &[
                "Stand behind your chair for support",
                "Rise up onto your toes",
                "Lower slowly with control",
                "Repeat for 30 seconds",
            ],
        ),
        exercise(
            "leg-2",
            "Hamstring Stretch",
            "Stretch tight hamstrings from sitting",
            Category::Legs,
            &[
                "Extend right leg straight out",
                "Flex foot and reach toward toes",
                "Hold for 15 seconds",
                "Repeat with left leg",
            ],
        ),
        exercise(
            "leg-3",
            "Quad Stretch",
            "Stretch the front thigh muscles",
            Category::Legs,
            &[
                "Stand and hold chair for balance",
                "Bend right knee, bringing heel to glute",
                "Hold ankle with right hand",
                "Hold 15 seconds each leg",
            ],
        ),
        exercise(
            "feet-1",
            "Ankle Circles",
            "Improve ankle mobility and circulation",
            Category::Feet,
            &[
                "Lift right foot slightly off ground",
                "Make 10 circles clockwise",
                "Make 10 circles counterclockwise",
                "Repeat with left foot",
            ],
        ),
        exercise(
            "feet-2",
            "Toe Points and Flexes",
            "Stretch calves and shins",
            Category::Feet,
            &[
                "Extend legs and point toes away",
                "Hold for 3 seconds",
                "Flex feet back toward shins",
                "Repeat for 30 seconds",
            ],
        ),
        exercise(
            "feet-3",
            "Heel-Toe Walks",
            "Improve balance and ankle stability",
            Category::Feet,
            &[
                "Stand and walk in place",
                "Place heel of one foot directly in front of toes of other",
                "Walk heel-to-toe for 10 steps",
                "Turn around and repeat",
            ],
        ),
        exercise(
            "hand-1",
            "Wrist Circles",
            "Improve wrist mobility and reduce stiffness",
            Category::Hands,
            &[
                "Extend arms in front of you",
                "Make circles with your wrists",
                "10 circles in each direction",
                "Keep movements slow and controlled",
            ],
        ),
        exercise(
            "hand-2",
            "Finger Stretches",
            "Relieve finger and hand tension",
            Category::Hands,
            &[
                "Make a fist, then spread fingers wide",
                "Hold spread for 5 seconds",
                "Repeat 6 times",
                "Shake hands out gently",
            ],
        ),
        exercise(
            "hand-3",
            "Prayer Stretch",
            "Stretch wrists and forearms",
            Category::Hands,
            &[
                "Press palms together in front of chest",
                "Lower hands while keeping palms together",
                "Feel stretch in wrists and forearms",
                "Hold for 15 seconds, repeat",
            ],
        ),
        exercise(
            "fullbody-1",
            "Standing Desk Stretch",
            "Full body stretch sequence",
            Category::FullBody,
            &[
                "Stand and reach arms overhead",
                "Lean gently to the right, then left",
                "Reach forward and round spine",
                "Stand and repeat sequence",
            ],
        ),
        exercise(
            "fullbody-2",
            "Desk Push-ups",
            "Upper body strength exercise using desk",
            Category::FullBody,
            &[
                "Place hands on edge of desk",
                "Step feet back into plank position",
                "Perform push-ups against desk",
                "Complete as many as possible in 30 seconds",
            ],
        ),
        exercise(
            "fullbody-3",
            "Chair Squats",
            "Lower body strengthening exercise",
            Category::FullBody,
            &[
                "Stand in front of your chair",
                "Lower down as if sitting, but don't sit",
                "Stand back up when you barely touch chair",
                "Repeat for 30 seconds",
            ],
        ),
        exercise(
            "stretch-1",
            "Side Body Stretch",
            "Lengthen the sides of your torso",
            Category::Stretch,
            &[
                "Raise right arm overhead",
                "Lean to the left, feeling stretch on right side",
                "Hold for 15 seconds",
                "Repeat on other side",
            ],
        ),
        exercise(
            "stretch-2",
            "Forward Fold",
            "Release tension in back and hamstrings",
            Category::Stretch,
            &[
                "Stand with feet hip-width apart",
                "Slowly fold forward from hips",
                "Let arms hang down toward floor",
                "Hold for 15-30 seconds",
            ],
        ),
        exercise(
            "stretch-3",
            "Chest Doorway Stretch",
            "Open chest and improve posture",
            Category::Stretch,
            &[
                "Stand in doorway with arms on frame",
                "Step forward gently",
                "Feel stretch across chest",
                "Hold for 15-30 seconds",
            ],
        ),
        exercise(
            "strength-1",
            "Wall Push-ups",
            "Upper body strengthening exercise",
            Category::Strength,
            &[
                "Stand arm's length from wall",
                "Place palms flat against wall",
                "Push away from wall and return",
                "Repeat for 30 seconds",
            ],
        ),
        exercise(
            "strength-2",
            "Glute Squeezes",
            "Activate and strengthen glutes",
            Category::Strength,
            &[
                "Sit or stand with feet hip-width apart",
                "Squeeze glute muscles tight",
                "Hold for 5 seconds, release",
                "Repeat for 30 seconds",
            ],
        ),
        exercise(
            "strength-3",
            "Standing Marches",
            "Core activation and balance",
            Category::Strength,
            &[
                "Stand tall with hands on hips",
                "Lift right knee toward chest",
                "Lower and lift left knee",
                "Continue marching for 30 seconds",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn three_per_category() {
        let all = default_exercises();
        assert_eq!(all.len(), 30);
        for category in Category::ALL {
            assert_eq!(
                all.iter().filter(|e| e.category == category).count(),
                3,
                "{category}"
            );
        }
    }

    #[test]
    fn ids_are_unique_and_durations_positive() {
        let all = default_exercises();
        let ids: HashSet<_> = all.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), all.len());
        assert!(all.iter().all(|e| e.duration > 0 && !e.instructions.is_empty()));
    }
}
