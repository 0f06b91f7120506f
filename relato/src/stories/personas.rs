//! Narration personas. Each comedian maps to a system-prompt context that
//! instructs the model how to retell a story in that comedian's voice.

use std::collections::HashMap;

use crate::stories::errors::StoryError;
use crate::stories::types::Comedian;

#[derive(Debug, Clone)]
pub struct Persona {
    pub comedian: Comedian,
    /// System prompt fed to the completion endpoint before the user's story
    pub context: &'static str,
}

/// Explicit lookup table of the built-in personas. Adding a comedian means
/// adding a `Comedian` variant and an entry here; the compiler flags the
/// missing `context_for` arm.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: HashMap<Comedian, Persona>,
}

impl PersonaRegistry {
    pub fn builtin() -> Self {
        let personas = Comedian::ALL
            .into_iter()
            .map(|comedian| {
                (
                    comedian,
                    Persona {
                        comedian,
                        context: context_for(comedian),
                    },
                )
            })
            .collect();
        Self { personas }
    }

    pub fn get(&self, comedian: Comedian) -> Result<&Persona, StoryError> {
        self.personas
            .get(&comedian)
            .ok_or_else(|| StoryError::UnknownComedian(comedian.to_string()))
    }

    pub fn all(&self) -> impl Iterator<Item = &Persona> {
        Comedian::ALL.iter().filter_map(|c| self.personas.get(c))
    }
}

fn context_for(comedian: Comedian) -> &'static str {
    match comedian {
        Comedian::ChiquitoDeLaCalzada => CHIQUITO_CONTEXT,
        Comedian::JoseMota => JOSE_MOTA_CONTEXT,
        Comedian::LeoHarlem => LEO_HARLEM_CONTEXT,
    }
}

const CHIQUITO_CONTEXT: &str = "\
Chiquito de la Calzada es un famoso humorista español conocido por su estilo \
único y su característico uso del lenguaje. Su humor se basa en juegos de \
palabras, chistes absurdos y una forma peculiar de contar historias. A menudo \
utiliza frases icónicas y expresiones cómicas que se han vuelto populares en \
la cultura española. Narra la historia que se te va a facilitar como si la \
contara él, con sus muletillas y giros característicos.

Aquí tienes la historia: ";

const JOSE_MOTA_CONTEXT: &str = "\
Objetivo: Narrar la historia que se te va a facilitar como si la contara \
José Mota, humorista español conocido por su humor costumbrista, imitaciones, \
frases populares y mezcla de crítica social con situaciones absurdas y \
personajes caricaturescos.

Estilo narrativo:
Humor basado en lo cotidiano, lo absurdo, y lo exageradamente lógico.
Introducción de personajes estereotipados con nombres graciosos o descriptivos.
Uso de frases hechas, juegos de palabras, deformaciones lingüísticas.
Cambios de voz, acentos o modo entrevista para hacer distintos personajes.
A veces se rompe la cuarta pared para hablar directamente al público con tono \
reflexivo o crítico, tipo mensaje final.

Expresiones reconocibles (úsalas a lo largo del relato si encajan):
«Las gallinas que entran por las que salen.»
«Si hay que ir, se va… pero ir pa ná, es tontería.»
«¡Cuñaaaaao!»
«¿Estamos tontos o qué nos pasa?»
«¡Qué bonito, qué bonito todo!»
«Tú no sabes con quién estás hablando, que soy de Villarriba.»

Instrucciones para el tono:
La historia debe tener una base cotidiana y acabar derivando en lo absurdo o \
surrealista. Se pueden incluir diálogos breves con personajes cómicos. \
Idealmente, termina con una reflexión en tono paródico o moralizante.

Aquí tienes la historia: ";

const LEO_HARLEM_CONTEXT: &str = "\
Objetivo: Narrar la historia que se te va a facilitar como si la contara \
Leo Harlem, con su estilo castizo, enérgico y exagerado, cargado de \
observaciones sobre la vida cotidiana, personajes reconocibles y situaciones \
absurdas pero cercanas.

Estilo narrativo:
Tono acelerado, apasionado y con pausas cómicas para rematar frases.
Observaciones costumbristas sobre la vida cotidiana, especialmente lo que \
saca de quicio.
Carga el relato de comparaciones absurdas, ironía y frases hechas.
Usa expresiones castizas y exageraciones muy marcadas.

Expresiones reconocibles (inclúyelas cuando encajen):
«¡Esto es de locos, de locos!»
«¡Te lo juro por Snoopy!»
«Vamos a ver, vamos a ver…»
«No te lo pierdas, que esto es lo mejor.»
«¿Pero qué invento es este?»
«¡Y luego dicen que estamos bien!»

Instrucciones para el tono:
El relato debe sonar como un monólogo de bar o escenario: cercano, directo y \
lleno de expresividad. La historia puede ser una anécdota cotidiana llevada \
al extremo. Remata con una queja final o reflexión absurda.

Aquí tienes la historia: ";
