//! Fixed tuning values for the simulation.
//!
//! These values are the startup configuration surface. A subset can be
//! overridden through [`crate::config::SimConfig`]; everything else is fixed.

// Arena and viewport (world units, +y points down the screen).
/// Arena width in world units.
pub const ARENA_WIDTH: f32 = 2800.0;
/// Arena height in world units.
pub const ARENA_HEIGHT: f32 = 2000.0;
/// Viewport width.
pub const WINDOW_WIDTH: f32 = 1920.0;
/// Viewport height.
pub const WINDOW_HEIGHT: f32 = 1080.0;
/// Nominal ticks per second.
pub const FRAMERATE: f32 = 60.0;

// Player movement.
/// Speed cap while walking or idling.
pub const MAX_RUN_SPEED: f32 = 550.0;
/// Speed cap while the gatling is firing.
pub const MAX_GATLING_SPEED: f32 = 160.0;
/// Roll speed per unit of input direction.
pub const ROLL_MULT_FACTOR: f32 = 750.0;
/// Steering acceleration in units per second squared.
pub const WALK_ACCELERATION: f32 = 7500.0;
/// Per-second base of the idle drag applied as `velocity *= base^dt`.
pub const IDLE_DRAG_BASE: f32 = 0.0001;
/// Player collision radius.
pub const PLAYER_RADIUS: f32 = 40.0;
/// Hand distance from the body at spawn.
pub const INITIAL_AIM_DISTANCE: f32 = 60.0;

// Player health.
/// Health ceiling.
pub const MAX_HEALTH: f32 = 100.0;
/// Health at spawn.
pub const INITIAL_HEALTH: f32 = MAX_HEALTH;
/// Health lost per hit.
pub const HEALTH_LOSS: f32 = 40.0;
/// Health regained per second while alive.
pub const HEALTH_REGEN_PER_SEC: f32 = 2.0;
/// Seconds of immunity after a hit.
pub const INVULNERABILITY_WINDOW: f32 = 1.25;
/// Impulse pushing the player away from whatever hurt it.
pub const HURT_KNOCKBACK: f32 = 1600.0;
/// Camera shake on a hit.
pub const HURT_SHAKE: f32 = 30.0;

// Timer seeds. Large values mean "long ago", so the gate is open at spawn.
/// Seed for the since-damage timer.
pub const SINCE_DAMAGE: f32 = 999.0;
/// Seed for the weapon cooldown timer.
pub const LAST_FIRE: f32 = 999.0;
/// Seed for the since-roll-finish timer.
pub const SINCE_ROLL_FINISH: f32 = 999.0;

/// Seconds between footstep bursts while walking.
pub const FOOTSTEP_INTERVAL: f32 = 1.0 / 3.0;
/// Camera shake when a roll ends.
pub const ROLL_EXIT_SHAKE: f32 = 15.0;
/// Dust puffs spawned when a roll ends.
pub const ROLL_DUST_PUFFS: u32 = 20;

// Aim smoothing.
/// Rate at which the aim angle eases toward the cursor.
pub const AIM_SMOOTHING_RATE: f32 = 25.0;
/// Rate at which the arm eases toward the aim.
pub const ARM_SMOOTHING_RATE: f32 = 100.0;
/// Arm turn cap in degrees per second.
pub const ARM_MAX_TURN_RATE: f32 = 1000.0;
/// Drag on the arm kick velocity.
pub const AIM_KNOCKBACK_DRAG: f32 = 50_000.0;
/// Lowest arm kick velocity.
pub const AIM_KNOCKBACK_FLOOR: f32 = -500.0;
/// Player weight in the camera target blend; the cursor gets the rest.
pub const CAMERA_PLAYER_WEIGHT: f32 = 0.8;

// Weapon cooldowns (seconds).
/// Pistol cooldown.
pub const GUN_COOLDOWN: f32 = 0.45;
/// Bread cooldown.
pub const BREAD_COOLDOWN: f32 = 1.0;
/// Shuriken cooldown.
pub const SHURIKEN_COOLDOWN: f32 = 0.9;
/// Flamethrower cooldown.
pub const FIRE_COOLDOWN: f32 = 5.0;
/// Gatling cooldown.
pub const GATLING_COOLDOWN: f32 = 0.1;
/// Knife cooldown.
pub const KNIFE_COOLDOWN: f32 = 0.9;

// Weapon damage.
/// Pistol bullet damage.
pub const GUN_DAMAGE: f32 = 60.0;
/// Gatling bullet damage.
pub const GATLING_DAMAGE: f32 = 40.0;
/// Damage per shuriken strike.
pub const SHURIKEN_DAMAGE: f32 = 30.0;
/// Bread only bounces.
pub const BREAD_DAMAGE: f32 = 0.0;
/// Knife stab damage.
pub const KNIFE_DAMAGE: f32 = 130.0;

// Recoil impulses, applied opposite the aim.
/// Pistol recoil.
pub const GUN_RECOIL: f32 = 500.0;
/// Gatling recoil.
pub const GATLING_RECOIL: f32 = 350.0;
/// Shuriken recoil.
pub const SHURIKEN_RECOIL: f32 = 500.0;

/// Distance from the player to the knife strike point; also the base reach.
pub const KNIFE_REACH: f32 = 150.0;
/// Muzzle distance beyond the hand.
pub const MUZZLE_EXTRA: f32 = 28.0;
/// Extra barrel length of the gatling.
pub const GATLING_BARREL_EXTRA: f32 = 125.0;
/// Downward screen offset of the gatling barrel.
pub const GATLING_BARREL_DROP: f32 = 25.0;

// Bullet.
/// Bullet speed.
pub const BULLET_SPEED: f32 = 4000.0;
/// Bullet radius.
pub const BULLET_RADIUS: f32 = 25.0;
/// Distance past the viewport at which bullets are dropped.
pub const BULLET_OFFSCREEN_MARGIN: f32 = 2000.0;
/// Fraction of the relative velocity handed to a struck enemy.
pub const BULLET_VELOCITY_TRANSFER: f32 = 0.1;
/// Full width of the random spawn jitter in radians (centred on zero).
pub const SPAWN_JITTER_SPREAD: f32 = std::f32::consts::PI / 15.0;

// Bread.
/// Launch speed.
pub const BREAD_SPEED: f32 = 600.0;
/// Bread radius.
pub const BREAD_RADIUS: f32 = 25.0;
/// Per-second ground drag base.
pub const BREAD_DRAG_BASE: f32 = 0.5;
/// Downward pull on the height axis.
pub const BREAD_GRAVITY: f32 = 1200.0;
/// Initial height velocity; negative is up.
pub const BREAD_LAUNCH_ZVEL: f32 = -500.0;
/// Height velocity after bouncing off an enemy.
pub const BREAD_BOUNCE_ZVEL: f32 = -200.0;
/// Ground speed kept after a bounce.
pub const BREAD_BOUNCE_FACTOR: f32 = 0.8;
/// Seconds before a loaf is dropped.
pub const BREAD_MAX_AGE: f32 = 20.0;
/// Angle a landed loaf settles at.
pub const BREAD_REST_ANGLE: f32 = -30.0;

// Shuriken.
/// Launch speed.
pub const SHURIKEN_SPEED: f32 = 2000.0;
/// Shuriken radius.
pub const SHURIKEN_RADIUS: f32 = 20.0;
/// Age at which a star starts to fade.
pub const SHURIKEN_FADE_AGE: f32 = 3.0;
/// Per-second drag base before fading.
pub const SHURIKEN_CRUISE_DRAG_BASE: f32 = 0.9;
/// Per-second drag base while fading.
pub const SHURIKEN_FADE_DRAG_BASE: f32 = 0.0001;
/// Initial spin in degrees per second.
pub const SHURIKEN_SPIN_SPEED: f32 = 1000.0;
/// Per-second spin decay base.
pub const SHURIKEN_SPIN_DECAY_BASE: f32 = 0.001;
/// Opacity at launch.
pub const SHURIKEN_ALPHA: f32 = 255.0;
/// Opacity lost per second while fading.
pub const SHURIKEN_FADE_RATE: f32 = 500.0;

// Collision.
/// Half-width of the boss laser corridor.
pub const LASER_CORRIDOR_HALF_WIDTH: f32 = 40.0;

// Session presentation state.
/// Overlay opacity right after a hit.
pub const DAMAGE_FLASH_ALPHA: f32 = 255.0;
/// Overlay opacity lost per second.
pub const DAMAGE_FLASH_FADE_RATE: f32 = 600.0;
