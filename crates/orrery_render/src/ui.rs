use bevy::prelude::*;
use orrery_core::{BodyId, SpeedConfig, constants::SPEED_STEP};
use orrery_sim::{ControlEvent, ControlQueue, OrrerySet, SimulationContext};

/// Speed panel, pause button and keyboard pause
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_controls)
            .add_systems(
                Update,
                (speed_button_system, pause_button_system, keyboard_pause_system)
                    .in_set(OrrerySet::Input)
                    .run_if(resource_exists::<SimulationContext>),
            )
            .add_systems(
                Update,
                update_control_labels
                    .in_set(OrrerySet::Sync)
                    .run_if(resource_exists::<SimulationContext>),
            );
    }
}

// --- Markers ---

#[derive(Component)]
struct ControlPanel;

#[derive(Component)]
struct SpeedLabel(BodyId);

#[derive(Component)]
struct SpeedButton {
    body: BodyId,
    delta: f64,
}

#[derive(Component)]
struct PauseButton;

#[derive(Component)]
struct PauseLabel;

pub fn speed_label(body: BodyId, speed: f64) -> String {
    format!("{} Speed: {:.2}", body.label(), speed)
}

pub fn pause_caption(paused: bool) -> &'static str {
    if paused { "Play" } else { "Pause" }
}

/// Next value for a stepped speed control. Values snap to whole steps
/// and never leave the configured bounds.
pub fn step_speed(current: f64, delta: f64, bounds: &SpeedConfig) -> f64 {
    bounds.clamp((current + delta).round())
}

fn label_font() -> TextFont {
    TextFont {
        font_size: 14.0,
        ..default()
    }
}

fn spawn_step_button(row: &mut ChildBuilder, body: BodyId, delta: f64, caption: &str) {
    row.spawn((
        Button,
        Node {
            width: Val::Px(22.0),
            height: Val::Px(20.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(Color::srgba(0.25, 0.25, 0.25, 0.9)),
        SpeedButton { body, delta },
    ))
    .with_children(|btn| {
        btn.spawn((Text::new(caption), label_font(), TextColor(Color::WHITE)));
    });
}

fn spawn_controls(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            BorderRadius::all(Val::Px(5.0)),
            ControlPanel,
        ))
        .with_children(|panel| {
            for body in BodyId::PLANETS {
                panel
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            Text::new(format!("{} Speed:", body.label())),
                            label_font(),
                            TextColor(Color::WHITE),
                            Node {
                                width: Val::Px(150.0),
                                ..default()
                            },
                            SpeedLabel(body),
                        ));
                        spawn_step_button(row, body, -SPEED_STEP, "-");
                        spawn_step_button(row, body, SPEED_STEP, "+");
                    });
            }

            panel
                .spawn((
                    Button,
                    Node {
                        margin: UiRect::top(Val::Px(10.0)),
                        padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.1, 0.2, 0.5, 0.9)),
                    PauseButton,
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new(pause_caption(false)),
                        label_font(),
                        TextColor(Color::WHITE),
                        PauseLabel,
                    ));
                });
        });
}

fn speed_button_system(
    buttons: Query<(&Interaction, &SpeedButton), Changed<Interaction>>,
    context: Res<SimulationContext>,
    mut queue: ResMut<ControlQueue>,
) {
    for (interaction, button) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let current = match context.speeds().get_speed(button.body) {
            Ok(speed) => speed,
            Err(e) => {
                warn!("Ignoring speed button: {e}");
                continue;
            }
        };
        let value = step_speed(current, button.delta, context.speed_bounds());
        queue.push(ControlEvent::SetSpeed {
            body: button.body,
            value,
        });
    }
}

fn pause_button_system(
    buttons: Query<&Interaction, (Changed<Interaction>, With<PauseButton>)>,
    mut queue: ResMut<ControlQueue>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            queue.push(ControlEvent::TogglePause);
        }
    }
}

/// Space toggles pause, same as the button
fn keyboard_pause_system(keyboard: Res<ButtonInput<KeyCode>>, mut queue: ResMut<ControlQueue>) {
    if keyboard.just_pressed(KeyCode::Space) {
        queue.push(ControlEvent::TogglePause);
    }
}

fn update_control_labels(
    context: Res<SimulationContext>,
    mut speed_labels: Query<(&mut Text, &SpeedLabel), Without<PauseLabel>>,
    mut pause_labels: Query<&mut Text, With<PauseLabel>>,
) {
    for (mut text, label) in &mut speed_labels {
        let Ok(speed) = context.speeds().get_speed(label.0) else {
            continue;
        };
        let wanted = speed_label(label.0, speed);
        if **text != wanted {
            **text = wanted;
        }
    }

    let caption = pause_caption(context.is_paused());
    for mut text in &mut pause_labels {
        if **text != caption {
            **text = caption.to_string();
        }
    }
}
