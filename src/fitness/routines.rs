//! Seven-day gym routines per goal.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorkoutDay {
    pub day: &'static str,
    pub exercises: &'static [&'static str],
}

pub const LOSE_FAT: &[WorkoutDay] = &[
    WorkoutDay {
        day: "Monday - Chest & Triceps",
        exercises: &[
            "Bench Press (4 sets of 10)",
            "Incline Dumbbell Press (3 sets of 12)",
            "Cable Flys (3 sets of 15)",
            "Tricep Dips (3 sets of 12)",
            "Overhead Tricep Extension (3 sets of 15)",
            "Treadmill (20 mins moderate pace)",
        ],
    },
    WorkoutDay {
        day: "Tuesday - Back & Biceps",
        exercises: &[
            "Deadlifts (4 sets of 8)",
            "Lat Pulldown (3 sets of 12)",
            "Barbell Rows (3 sets of 10)",
            "Dumbbell Curls (3 sets of 12)",
            "Hammer Curls (3 sets of 15)",
            "Rowing Machine (20 mins moderate pace)",
        ],
    },
    WorkoutDay {
        day: "Wednesday - Legs & Shoulders",
        exercises: &[
            "Squats (4 sets of 10)",
            "Leg Press (3 sets of 12)",
            "Lunges (3 sets of 10 each leg)",
            "Overhead Press (3 sets of 12)",
            "Lateral Raises (3 sets of 15)",
            "Stair Climber (20 mins moderate pace)",
        ],
    },
    WorkoutDay {
        day: "Thursday - Chest & Triceps",
        exercises: &[
            "Incline Bench Press (4 sets of 10)",
            "Dumbbell Flys (3 sets of 12)",
            "Push-ups (3 sets to failure)",
            "Tricep Pushdowns (3 sets of 15)",
            "Skull Crushers (3 sets of 12)",
            "Elliptical (20 mins moderate pace)",
        ],
    },
    WorkoutDay {
        day: "Friday - Back & Biceps",
        exercises: &[
            "Pull-ups (4 sets of 8)",
            "T-Bar Rows (3 sets of 10)",
            "Seated Cable Rows (3 sets of 12)",
            "Preacher Curls (3 sets of 12)",
            "Concentration Curls (3 sets of 15)",
            "Stationary Bike (20 mins moderate pace)",
        ],
    },
    WorkoutDay {
        day: "Saturday - Legs & Shoulders",
        exercises: &[
            "Deadlifts (4 sets of 8)",
            "Leg Curls (3 sets of 12)",
            "Calf Raises (3 sets of 15)",
            "Arnold Press (3 sets of 12)",
            "Front Raises (3 sets of 15)",
            "Treadmill HIIT (20 mins)",
        ],
    },
    WorkoutDay {
        day: "Sunday - Abs & Recovery",
        exercises: &[
            "Cable Crunches (3 sets of 15)",
            "Hanging Leg Raises (3 sets of 12)",
            "Russian Twists (3 sets of 20)",
            "Plank (3 sets of 1 min)",
            "Yoga or Stretching (30 mins)",
        ],
    },
];

pub const GAIN_WEIGHT: &[WorkoutDay] = &[
    WorkoutDay {
        day: "Monday - Chest & Triceps",
        exercises: &[
            "Bench Press (4 sets of 8)",
            "Incline Dumbbell Press (4 sets of 10)",
            "Cable Flys (3 sets of 12)",
            "Tricep Dips (3 sets of 12)",
            "Overhead Tricep Extension (3 sets of 15)",
            "Treadmill (10 mins warm-up)",
        ],
    },
    WorkoutDay {
        day: "Tuesday - Back & Biceps",
        exercises: &[
            "Deadlifts (4 sets of 6)",
            "Lat Pulldown (4 sets of 10)",
            "Barbell Rows (4 sets of 8)",
            "Dumbbell Curls (3 sets of 12)",
            "Hammer Curls (3 sets of 15)",
            "Rowing Machine (10 mins warm-up)",
        ],
    },
    WorkoutDay {
        day: "Wednesday - Legs & Shoulders",
        exercises: &[
            "Squats (4 sets of 8)",
            "Leg Press (4 sets of 10)",
            "Lunges (3 sets of 10 each leg)",
            "Overhead Press (4 sets of 10)",
            "Lateral Raises (3 sets of 15)",
            "Stair Climber (10 mins warm-up)",
        ],
    },
    WorkoutDay {
        day: "Thursday - Chest & Triceps",
        exercises: &[
            "Incline Bench Press (4 sets of 8)",
            "Dumbbell Flys (3 sets of 12)",
            "Push-ups (3 sets to failure)",
            "Tricep Pushdowns (3 sets of 15)",
            "Skull Crushers (3 sets of 12)",
            "Elliptical (10 mins warm-up)",
        ],
    },
    WorkoutDay {
        day: "Friday - Back & Biceps",
        exercises: &[
            "Pull-ups (4 sets of 6)",
            "T-Bar Rows (4 sets of 8)",
            "Seated Cable Rows (3 sets of 12)",
            "Preacher Curls (3 sets of 12)",
            "Concentration Curls (3 sets of 15)",
            "Stationary Bike (10 mins warm-up)",
        ],
    },
    WorkoutDay {
        day: "Saturday - Legs & Shoulders",
        exercises: &[
            "Deadlifts (4 sets of 6)",
            "Leg Curls (3 sets of 12)",
            "Calf Raises (3 sets of 15)",
            "Arnold Press (3 sets of 12)",
            "Front Raises (3 sets of 15)",
            "Treadmill (10 mins warm-up)",
        ],
    },
    WorkoutDay {
        day: "Sunday - Abs & Recovery",
        exercises: &[
            "Cable Crunches (3 sets of 15)",
            "Hanging Leg Raises (3 sets of 12)",
            "Russian Twists (3 sets of 20)",
            "Plank (3 sets of 1 min)",
            "Yoga or Stretching (30 mins)",
        ],
    },
];

pub const CUTTING: &[WorkoutDay] = &[
    WorkoutDay {
        day: "Monday - Chest & Triceps",
        exercises: &[
            "Bench Press (4 sets of 10)",
            "Incline Dumbbell Press (3 sets of 12)",
            "Cable Flys (3 sets of 15)",
            "Tricep Dips (3 sets of 12)",
            "Overhead Tricep Extension (3 sets of 15)",
            "Treadmill HIIT (20 mins)",
        ],
    },
    WorkoutDay {
        day: "Tuesday - Back & Biceps",
        exercises: &[
            "Deadlifts (4 sets of 8)",
            "Lat Pulldown (3 sets of 12)",
            "Barbell Rows (3 sets of 10)",
            "Dumbbell Curls (3 sets of 12)",
            "Hammer Curls (3 sets of 15)",
            "Rowing Machine HIIT (20 mins)",
        ],
    },
    WorkoutDay {
        day: "Wednesday - Legs & Shoulders",
        exercises: &[
            "Squats (4 sets of 10)",
            "Leg Press (3 sets of 12)",
            "Lunges (3 sets of 10 each leg)",
            "Overhead Press (3 sets of 12)",
            "Lateral Raises (3 sets of 15)",
            "Stair Climber HIIT (20 mins)",
        ],
    },
    WorkoutDay {
        day: "Thursday - Chest & Triceps",
        exercises: &[
            "Incline Bench Press (4 sets of 10)",
            "Dumbbell Flys (3 sets of 12)",
            "Push-ups (3 sets to failure)",
            "Tricep Pushdowns (3 sets of 15)",
            "Skull Crushers (3 sets of 12)",
            "Elliptical HIIT (20 mins)",
        ],
    },
    WorkoutDay {
        day: "Friday - Back & Biceps",
        exercises: &[
            "Pull-ups (4 sets of 8)",
            "T-Bar Rows (3 sets of 10)",
            "Seated Cable Rows (3 sets of 12)",
            "Preacher Curls (3 sets of 12)",
            "Concentration Curls (3 sets of 15)",
            "Stationary Bike HIIT (20 mins)",
        ],
    },
    WorkoutDay {
        day: "Saturday - Legs & Shoulders",
        exercises: &[
            "Deadlifts (4 sets of 8)",
            "Leg Curls (3 sets of 12)",
            "Calf Raises (3 sets of 15)",
            "Arnold Press (3 sets of 12)",
            "Front Raises (3 sets of 15)",
            "Treadmill HIIT (20 mins)",
        ],
    },
    WorkoutDay {
        day: "Sunday - Abs & Recovery",
        exercises: &[
            "Cable Crunches (3 sets of 15)",
            "Hanging Leg Raises (3 sets of 12)",
            "Russian Twists (3 sets of 20)",
            "Plank (3 sets of 1 min)",
            "Yoga or Stretching (30 mins)",
        ],
    },
];
